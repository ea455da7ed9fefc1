//! Body extraction from exported `.eml` messages.
//!
//! illimity sends multipart/alternative mail; the text/plain part is what the
//! notification patterns are written against. HTML is only a fallback, with
//! tags stripped.

use anyhow::{Context, Result};
use mailparse::{ParsedMail, parse_mail};
use regex::Regex;

/// Return the plain-text body of a raw RFC 822 message.
pub fn extract_plain_body(bytes: &[u8]) -> Result<String> {
    let mail = parse_mail(bytes).context("parsing MIME message")?;

    if let Some(body) = find_part(&mail, "text/plain") {
        return Ok(body);
    }

    let html = find_part(&mail, "text/html").context("message has no text/plain or text/html part")?;
    strip_tags(&html)
}

fn find_part(mail: &ParsedMail, mimetype: &str) -> Option<String> {
    if mail.ctype.mimetype.eq_ignore_ascii_case(mimetype) {
        if let Ok(body) = mail.get_body() {
            return Some(body);
        }
    }
    mail.subparts.iter().find_map(|part| find_part(part, mimetype))
}

fn strip_tags(html: &str) -> Result<String> {
    let tag_re = Regex::new(r"(?s)<[^>]*>")?;
    let text = tag_re.replace_all(html, "");
    Ok(text
        .replace("&nbsp;", " ")
        .replace("&egrave;", "è")
        .replace("&amp;", "&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTIPART: &str = "From: illimity <noreply@illimity.com>\r\n\
Subject: Pagamento con carta\r\n\
MIME-Version: 1.0\r\n\
Content-Type: multipart/alternative; boundary=\"XYZ\"\r\n\
\r\n\
--XYZ\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
il 15/03/2024 alle 14:30 hai effettuato un pagamento di *50,00* *EUR presso *AMAZON EU S.A R.L*\r\n\
--XYZ\r\n\
Content-Type: text/html; charset=utf-8\r\n\
\r\n\
<p>il 15/03/2024 alle 14:30 hai effettuato un pagamento di <b>50,00</b> EUR</p>\r\n\
--XYZ--\r\n";

    #[test]
    fn test_prefers_plain_part() {
        let body = extract_plain_body(MULTIPART.as_bytes()).unwrap();
        assert!(body.contains("pagamento di *50,00* *EUR presso *AMAZON EU S.A R.L*"));
        assert!(!body.contains("<p>"));
    }

    #[test]
    fn test_html_only_is_stripped() {
        let raw = "Content-Type: text/html; charset=utf-8\r\n\r\n<div>Il bonifico richiesto&egrave; andato</div>\r\n";
        let body = extract_plain_body(raw.as_bytes()).unwrap();
        assert!(body.contains("Il bonifico richiestoè andato"));
        assert!(!body.contains("<div>"));
    }

    #[test]
    fn test_single_part_plain_message() {
        let raw = "Subject: prelievo\r\n\r\nil 16/03/2024 alle 10:15 hai effettuato un prelievo di *100,00* *EUR\r\n";
        let body = extract_plain_body(raw.as_bytes()).unwrap();
        assert!(body.starts_with("il 16/03/2024"));
    }
}
