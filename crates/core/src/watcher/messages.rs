//! Notification text.
//!
//! Messages use Telegram's HTML parse mode.

use super::types::{TicketEvent, VoteEligibility};

/// Shorten a ticket hash to its first and last four characters.
pub fn short_id(ticket_id: &str) -> String {
    let chars: Vec<char> = ticket_id.chars().collect();
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Escape text for inclusion in an HTML message.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn ticket_event_message(event: &TicketEvent) -> String {
    let availability = match &event.maturity {
        Some(estimate) => format!("Funds will be available on <i>{}</i>.", estimate),
        None => "Funds maturity time is unavailable.".to_string(),
    };
    format!(
        "Ticket <code>{}</code> <b>{}</b>! {}\n",
        escape_html(&short_id(&event.ticket_id)),
        escape_html(event.status.as_str()),
        availability
    )
}

pub fn vote_eligibility_message(eligibility: &VoteEligibility, proposals_web_url: &str) -> String {
    format!(
        "<b>{}</b> Tickets now eligible to vote on proposal: <a href=\"{}/{}\">{}</a>\n",
        eligibility.eligible,
        proposals_web_url.trim_end_matches('/'),
        escape_html(&eligibility.token),
        escape_html(&eligibility.proposal_name)
    )
}

/// Combine the ticket and vote parts into one notification.
///
/// Returns `None` when there is nothing to say.
pub fn compose_message(
    events: &[TicketEvent],
    eligibilities: &[VoteEligibility],
    proposals_web_url: &str,
) -> Option<String> {
    let ticket_part: String = events.iter().map(ticket_event_message).collect();
    let vote_part: String = eligibilities
        .iter()
        .map(|e| vote_eligibility_message(e, proposals_web_url))
        .collect();

    match (ticket_part.is_empty(), vote_part.is_empty()) {
        (true, true) => None,
        (false, true) => Some(ticket_part),
        (true, false) => Some(vote_part),
        (false, false) => Some(format!("{} \n\n {}", ticket_part, vote_part)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::TicketStatus;

    fn voted(id: &str, maturity: Option<&str>) -> TicketEvent {
        TicketEvent {
            ticket_id: id.to_string(),
            status: TicketStatus::Voted,
            maturity: maturity.map(str::to_string),
        }
    }

    fn eligibility(n: usize, name: &str) -> VoteEligibility {
        VoteEligibility {
            token: "tok".to_string(),
            proposal_name: name.to_string(),
            eligible: n,
        }
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("abcd1234efgh5678"), "abcd...5678");
    }

    #[test]
    fn test_short_id_of_short_input() {
        assert_eq!(short_id("T2"), "T2...T2");
        assert_eq!(short_id(""), "...");
    }

    #[test]
    fn test_ticket_event_message() {
        let message = ticket_event_message(&voted(
            "abcd1234efgh5678",
            Some("Monday January 01, around 04:40AM"),
        ));
        assert_eq!(
            message,
            "Ticket <code>abcd...5678</code> <b>voted</b>! Funds will be available on \
             <i>Monday January 01, around 04:40AM</i>.\n"
        );
    }

    #[test]
    fn test_ticket_event_message_without_estimate() {
        let message = ticket_event_message(&voted("abcd1234efgh5678", None));
        assert!(message.contains("<b>voted</b>"));
        assert!(message.contains("Funds maturity time is unavailable."));
    }

    #[test]
    fn test_vote_message_escapes_name() {
        let message = vote_eligibility_message(
            &eligibility(3, "Ops & <Marketing>"),
            "https://proposals.decred.org/proposals/",
        );
        assert_eq!(
            message,
            "<b>3</b> Tickets now eligible to vote on proposal: \
             <a href=\"https://proposals.decred.org/proposals/tok\">Ops &amp; &lt;Marketing&gt;</a>\n"
        );
    }

    #[test]
    fn test_compose_message() {
        let web = "https://p";
        assert_eq!(compose_message(&[], &[], web), None);

        let tickets_only = compose_message(&[voted("abcdefgh1", None)], &[], web).unwrap();
        assert!(tickets_only.starts_with("Ticket"));

        let votes_only = compose_message(&[], &[eligibility(1, "P")], web).unwrap();
        assert!(votes_only.starts_with("<b>1</b>"));

        let both =
            compose_message(&[voted("abcdefgh1", None)], &[eligibility(1, "P")], web).unwrap();
        assert!(both.contains(".\n \n\n <b>1</b>"));
    }
}
