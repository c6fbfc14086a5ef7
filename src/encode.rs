//! Per-variant payload encoders.
//!
//! [`encode`] maps a [`ContentRecord`] to the exact string grammar the
//! target ecosystem's scanners expect. Encoders are pure and deterministic:
//! identical input yields a byte-identical payload, which is what lets the
//! host cache rendered symbols by content hash.
//!
//! The dispatch matches exhaustively over every variant, with no wildcard
//! arm, so a new content type fails to compile until its grammar is written.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::content::{ContentRecord, WifiAuth};
use crate::error::Error;

/// Characters kept literal inside url-encoded query values. Everything else
/// non-alphanumeric is percent-encoded.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// Encodes a content record into its canonical payload string.
pub fn encode(record: &ContentRecord) -> Result<String, Error> {
    match record {
        ContentRecord::Link { url }
        | ContentRecord::Product { url }
        | ContentRecord::Menu { url }
        | ContentRecord::Document { url }
        | ContentRecord::Pdf { url }
        | ContentRecord::Serial { url } => {
            require_url(url, "url")?;
            Ok(url.trim().to_owned())
        }

        ContentRecord::AppStore { fallback_url } => {
            require_url(fallback_url, "fallback_url")?;
            Ok(fallback_url.trim().to_owned())
        }

        ContentRecord::MultiUrl { landing_url } | ContentRecord::Social { landing_url } => {
            require_url(landing_url, "landing_url")?;
            Ok(landing_url.trim().to_owned())
        }

        ContentRecord::Text { text } => {
            let text = require(text, "text")?;
            Ok(text.to_owned())
        }

        ContentRecord::Phone { phone } => {
            let phone = require_phone(phone, "phone")?;
            Ok(format!("tel:{phone}"))
        }

        ContentRecord::Sms { phone, message } => {
            let phone = require_phone(phone, "phone")?;
            match opt(message) {
                Some(msg) => Ok(format!("SMSTO:{phone}:{msg}")),
                None => Ok(format!("SMSTO:{phone}")),
            }
        }

        ContentRecord::Email { address, subject, body } => {
            let address = require_email(address)?;
            let mut query = Vec::new();
            if let Some(s) = opt(subject) {
                query.push(format!("subject={}", utf8_percent_encode(s, QUERY_VALUE)));
            }
            if let Some(b) = opt(body) {
                query.push(format!("body={}", utf8_percent_encode(b, QUERY_VALUE)));
            }
            if query.is_empty() {
                Ok(format!("mailto:{address}"))
            } else {
                Ok(format!("mailto:{address}?{}", query.join("&")))
            }
        }

        ContentRecord::Wifi { ssid, password, auth, hidden } => {
            encode_wifi(ssid, password, *auth, *hidden)
        }

        ContentRecord::VCard {
            name,
            org,
            title,
            phone,
            mobile,
            email,
            website,
            street,
            city,
            zip,
            country,
            note,
        } => encode_vcard(VCardFields {
            name,
            org,
            title,
            phone,
            mobile,
            email,
            website,
            street,
            city,
            zip,
            country,
            note,
        }),

        ContentRecord::Calendar { title, location, description, start, end } => {
            let title = require(title, "title")?;
            if end < start {
                return Err(Error::invalid("end", "event ends before it starts"));
            }
            let mut lines = vec![
                "BEGIN:VCALENDAR".to_owned(),
                "VERSION:2.0".to_owned(),
                "BEGIN:VEVENT".to_owned(),
                format!("SUMMARY:{}", ical_escape(title)),
                format!("DTSTART:{}", start.format("%Y%m%dT%H%M%SZ")),
                format!("DTEND:{}", end.format("%Y%m%dT%H%M%SZ")),
            ];
            if let Some(loc) = opt(location) {
                lines.push(format!("LOCATION:{}", ical_escape(loc)));
            }
            if let Some(desc) = opt(description) {
                lines.push(format!("DESCRIPTION:{}", ical_escape(desc)));
            }
            lines.push("END:VEVENT".to_owned());
            lines.push("END:VCALENDAR".to_owned());
            Ok(lines.join("\r\n"))
        }

        ContentRecord::Location { latitude, longitude } => {
            if !latitude.is_finite() || !(-90.0..=90.0).contains(latitude) {
                return Err(Error::invalid("latitude", format!("{latitude} out of range [-90, 90]")));
            }
            if !longitude.is_finite() || !(-180.0..=180.0).contains(longitude) {
                return Err(Error::invalid(
                    "longitude",
                    format!("{longitude} out of range [-180, 180]"),
                ));
            }
            Ok(format!("geo:{latitude},{longitude}"))
        }

        ContentRecord::Upi { vpa, name, amount, currency, note } => {
            encode_upi(vpa, name, amount, currency, note)
        }

        ContentRecord::Pix { key, name, city, amount, txid } => {
            encode_pix(key, name, city, amount, txid)
        }
    }
}

/*---- WiFi ----*/

/// Reserved set of the `WIFI:` grammar: backslash plus the structural
/// characters a value must not terminate a field with.
fn wifi_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | ':' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn encode_wifi(ssid: &str, password: &str, auth: WifiAuth, hidden: bool) -> Result<String, Error> {
    let ssid = require(ssid, "ssid")?;
    let mut out = format!("WIFI:T:{};S:{};", auth.token(), wifi_escape(ssid));
    if auth != WifiAuth::Nopass {
        let password = require(password, "password")?;
        out.push_str(&format!("P:{};", wifi_escape(password)));
    }
    if hidden {
        out.push_str("H:true;");
    }
    out.push(';');
    Ok(out)
}

/*---- vCard ----*/

struct VCardFields<'a> {
    name: &'a str,
    org: &'a Option<String>,
    title: &'a Option<String>,
    phone: &'a Option<String>,
    mobile: &'a Option<String>,
    email: &'a Option<String>,
    website: &'a Option<String>,
    street: &'a Option<String>,
    city: &'a Option<String>,
    zip: &'a Option<String>,
    country: &'a Option<String>,
    note: &'a Option<String>,
}

/// Backslash-escapes the vCard reserved characters `\`, `;`, `,` and folds
/// newlines to the literal `\n` sequence, per RFC 2426.
fn vcard_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | ';' | ',' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

fn encode_vcard(f: VCardFields<'_>) -> Result<String, Error> {
    let name = require(f.name, "name")?;
    let mut lines = vec![
        "BEGIN:VCARD".to_owned(),
        "VERSION:3.0".to_owned(),
        format!("N:{};;;;", vcard_escape(name)),
        format!("FN:{}", vcard_escape(name)),
    ];
    if let Some(org) = opt(f.org) {
        lines.push(format!("ORG:{}", vcard_escape(org)));
    }
    if let Some(title) = opt(f.title) {
        lines.push(format!("TITLE:{}", vcard_escape(title)));
    }
    if let Some(phone) = opt(f.phone) {
        lines.push(format!("TEL;TYPE=WORK,VOICE:{}", vcard_escape(phone)));
    }
    if let Some(mobile) = opt(f.mobile) {
        lines.push(format!("TEL;TYPE=CELL:{}", vcard_escape(mobile)));
    }
    if let Some(email) = opt(f.email) {
        lines.push(format!("EMAIL:{}", vcard_escape(email)));
    }
    if let Some(website) = opt(f.website) {
        lines.push(format!("URL:{}", vcard_escape(website)));
    }
    let has_address = [f.street, f.city, f.zip, f.country].iter().any(|v| opt(v).is_some());
    if has_address {
        let part = |v: &Option<String>| opt(v).map(vcard_escape).unwrap_or_default();
        lines.push(format!(
            "ADR;TYPE=WORK:;;{};{};;{};{}",
            part(f.street),
            part(f.city),
            part(f.zip),
            part(f.country)
        ));
    }
    if let Some(note) = opt(f.note) {
        lines.push(format!("NOTE:{}", vcard_escape(note)));
    }
    lines.push("END:VCARD".to_owned());
    Ok(lines.join("\r\n"))
}

/*---- iCalendar ----*/

/// RFC 5545 TEXT escaping: backslash, semicolon, comma, and newlines.
fn ical_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | ';' | ',' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/*---- UPI ----*/

fn encode_upi(
    vpa: &str,
    name: &str,
    amount: &Option<String>,
    currency: &Option<String>,
    note: &Option<String>,
) -> Result<String, Error> {
    let vpa = require(vpa, "vpa")?;
    if !vpa.contains('@') {
        return Err(Error::invalid("vpa", "virtual payment address must contain '@'"));
    }
    let name = require(name, "name")?;
    let mut params = vec![
        format!("pa={}", utf8_percent_encode(vpa, QUERY_VALUE)),
        format!("pn={}", utf8_percent_encode(name, QUERY_VALUE)),
    ];
    // Empty optionals are omitted entirely, never emitted as `key=`.
    if let Some(am) = opt(amount) {
        validate_amount(am, "amount")?;
        params.push(format!("am={}", utf8_percent_encode(am, QUERY_VALUE)));
    }
    if let Some(cu) = opt(currency) {
        params.push(format!("cu={}", utf8_percent_encode(cu, QUERY_VALUE)));
    }
    if let Some(tn) = opt(note) {
        params.push(format!("tn={}", utf8_percent_encode(tn, QUERY_VALUE)));
    }
    Ok(format!("upi://pay?{}", params.join("&")))
}

/*---- PIX (EMV BR Code) ----*/

// EMV field IDs used by the BR Code payload.
const PIX_ID_PAYLOAD_FORMAT: &str = "00";
const PIX_ID_MERCHANT_INFO: &str = "26";
const PIX_ID_MCC: &str = "52";
const PIX_ID_CURRENCY: &str = "53";
const PIX_ID_AMOUNT: &str = "54";
const PIX_ID_COUNTRY: &str = "58";
const PIX_ID_NAME: &str = "59";
const PIX_ID_CITY: &str = "60";
const PIX_ID_ADDITIONAL: &str = "62";
const PIX_GUI: &str = "br.gov.bcb.pix";

/// One EMV TLV field: two-digit ID, two-digit length, then the value.
fn tlv(id: &str, value: &str) -> Result<String, Error> {
    debug_assert_eq!(id.len(), 2);
    if value.len() > 99 {
        return Err(Error::invalid("pix", format!("TLV field {id} exceeds 99 bytes")));
    }
    Ok(format!("{id}{:02}{value}", value.len()))
}

/// CRC16/CCITT-FALSE: polynomial 0x1021, initial value 0xFFFF, no
/// reflection, no final xor. This is the variant EMV QRCPS mandates.
fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xffff;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ 0x1021 } else { crc << 1 };
        }
    }
    crc
}

fn encode_pix(
    key: &str,
    name: &str,
    city: &str,
    amount: &Option<String>,
    txid: &Option<String>,
) -> Result<String, Error> {
    let key = require(key, "key")?;
    let name = require(name, "name")?;
    let city = require(city, "city")?;

    // EMV caps the display fields; scanners reject over-length values.
    let name: String = name.chars().take(25).collect();
    let city: String = city.chars().take(15).collect();

    let merchant_info =
        format!("{}{}", tlv("00", PIX_GUI)?, tlv("01", key)?);

    let mut payload = String::new();
    payload.push_str(&tlv(PIX_ID_PAYLOAD_FORMAT, "01")?);
    payload.push_str(&tlv(PIX_ID_MERCHANT_INFO, &merchant_info)?);
    payload.push_str(&tlv(PIX_ID_MCC, "0000")?);
    payload.push_str(&tlv(PIX_ID_CURRENCY, "986")?);
    if let Some(am) = opt(amount) {
        let value = validate_amount(am, "amount")?;
        // EMV convention: two decimal places.
        payload.push_str(&tlv(PIX_ID_AMOUNT, &format!("{value:.2}"))?);
    }
    payload.push_str(&tlv(PIX_ID_COUNTRY, "BR")?);
    payload.push_str(&tlv(PIX_ID_NAME, &name)?);
    payload.push_str(&tlv(PIX_ID_CITY, &city)?);
    let txid_value = opt(txid).unwrap_or("***");
    payload.push_str(&tlv(PIX_ID_ADDITIONAL, &tlv("05", txid_value)?)?);

    // The checksum covers every preceding byte including the `6304` tag.
    payload.push_str("6304");
    let crc = crc16_ccitt(payload.as_bytes());
    payload.push_str(&format!("{crc:04X}"));
    Ok(payload)
}

/*---- Field validation ----*/

/// Whitespace-only counts as blank.
fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// A non-empty optional, treating blank strings as absent.
fn opt(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn require_url<'a>(value: &'a str, field: &'static str) -> Result<&'a str, Error> {
    let url = require(value, field)?;
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| Error::invalid(field, "URL must use http or https"))?;
    if rest.is_empty() || url.chars().any(char::is_whitespace) {
        return Err(Error::invalid(field, format!("malformed URL {url:?}")));
    }
    Ok(url)
}

fn require_email(value: &str) -> Result<&str, Error> {
    let address = require(value, "address")?;
    let (local, domain) = address
        .split_once('@')
        .ok_or_else(|| Error::invalid("address", "missing '@'"))?;
    let valid = !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !address.chars().any(char::is_whitespace);
    if !valid {
        return Err(Error::invalid("address", format!("malformed email {address:?}")));
    }
    Ok(address)
}

fn require_phone<'a>(value: &'a str, field: &'static str) -> Result<&'a str, Error> {
    let phone = require(value, field)?;
    if !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::invalid(field, format!("no digits in {phone:?}")));
    }
    Ok(phone)
}

fn validate_amount(value: &str, field: &'static str) -> Result<f64, Error> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(Error::invalid(field, format!("not a positive decimal: {value:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn wifi(ssid: &str, password: &str, auth: WifiAuth) -> ContentRecord {
        ContentRecord::Wifi {
            ssid: ssid.into(),
            password: password.into(),
            auth,
            hidden: false,
        }
    }

    #[test]
    fn test_wifi_escapes_reserved_characters() {
        let payload = encode(&wifi("Caf;e", "p@ss", WifiAuth::Wpa)).unwrap();
        assert_eq!(payload, "WIFI:T:WPA;S:Caf\\;e;P:p@ss;;");
    }

    #[test]
    fn test_wifi_nopass_omits_password_field() {
        let payload = encode(&wifi("OpenNet", "", WifiAuth::Nopass)).unwrap();
        assert_eq!(payload, "WIFI:T:nopass;S:OpenNet;;");
    }

    #[test]
    fn test_wifi_hidden_flag() {
        let payload = encode(&ContentRecord::Wifi {
            ssid: "Secret".into(),
            password: "pw".into(),
            auth: WifiAuth::Wep,
            hidden: true,
        })
        .unwrap();
        assert_eq!(payload, "WIFI:T:WEP;S:Secret;P:pw;H:true;;");
    }

    #[test]
    fn test_wifi_escape_recoverable_by_conformant_parser() {
        let payload = encode(&wifi(r"a\b;c,d:e", "x", WifiAuth::Wpa)).unwrap();
        // Un-escape the S: field the way a conformant parser would and
        // check the literal original comes back.
        let s_field = payload.strip_prefix("WIFI:T:WPA;S:").unwrap();
        let s_field = &s_field[..s_field.find(";P:").unwrap()];
        let mut recovered = String::new();
        let mut chars = s_field.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                recovered.push(chars.next().unwrap());
            } else {
                recovered.push(c);
            }
        }
        assert_eq!(recovered, r"a\b;c,d:e");
    }

    #[test]
    fn test_geo_payload() {
        let payload = encode(&ContentRecord::Location {
            latitude: 37.7749,
            longitude: -122.4194,
        })
        .unwrap();
        assert_eq!(payload, "geo:37.7749,-122.4194");
    }

    #[test]
    fn test_geo_rejects_out_of_range() {
        let err = encode(&ContentRecord::Location { latitude: 91.0, longitude: 0.0 }).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { field: "latitude", .. }));
    }

    #[test]
    fn test_vcard_missing_name() {
        let err = encode(&ContentRecord::VCard {
            name: "  ".into(),
            org: None,
            title: None,
            phone: None,
            mobile: None,
            email: None,
            website: None,
            street: None,
            city: None,
            zip: None,
            country: None,
            note: None,
        })
        .unwrap_err();
        assert_eq!(err, Error::MissingField("name"));
    }

    #[test]
    fn test_vcard_escaping_and_structure() {
        let payload = encode(&ContentRecord::VCard {
            name: "Smith; John".into(),
            org: Some("Acme, Inc".into()),
            title: None,
            phone: Some("+1 555 0100".into()),
            mobile: None,
            email: Some("john@acme.test".into()),
            website: None,
            street: None,
            city: None,
            zip: None,
            country: None,
            note: None,
        })
        .unwrap();
        let lines: Vec<&str> = payload.split("\r\n").collect();
        assert_eq!(lines.first(), Some(&"BEGIN:VCARD"));
        assert_eq!(lines.last(), Some(&"END:VCARD"));
        assert!(lines.contains(&"VERSION:3.0"));
        assert!(lines.contains(&"FN:Smith\\; John"));
        assert!(lines.contains(&"ORG:Acme\\, Inc"));
        assert!(lines.contains(&"EMAIL:john@acme.test"));
    }

    #[test]
    fn test_email_encodes_query_parts() {
        let payload = encode(&ContentRecord::Email {
            address: "a@b.co".into(),
            subject: Some("Hello there".into()),
            body: Some("line 1 & 2".into()),
        })
        .unwrap();
        assert_eq!(payload, "mailto:a@b.co?subject=Hello%20there&body=line%201%20%26%202");
    }

    #[test]
    fn test_email_bare_when_no_query() {
        let payload = encode(&ContentRecord::Email {
            address: "a@b.co".into(),
            subject: None,
            body: Some("   ".into()),
        })
        .unwrap();
        assert_eq!(payload, "mailto:a@b.co");
    }

    #[test]
    fn test_email_rejects_malformed_address() {
        for bad in ["not-an-email", "a@b", "a @b.co", "@b.co"] {
            let err = encode(&ContentRecord::Email {
                address: bad.into(),
                subject: None,
                body: None,
            })
            .unwrap_err();
            assert!(
                matches!(err, Error::InvalidFormat { field: "address", .. }),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_sms_and_phone() {
        let sms = encode(&ContentRecord::Sms {
            phone: "+15550100".into(),
            message: Some("on my way".into()),
        })
        .unwrap();
        assert_eq!(sms, "SMSTO:+15550100:on my way");

        let bare = encode(&ContentRecord::Sms { phone: "+15550100".into(), message: None }).unwrap();
        assert_eq!(bare, "SMSTO:+15550100");

        let tel = encode(&ContentRecord::Phone { phone: "+15550100".into() }).unwrap();
        assert_eq!(tel, "tel:+15550100");
    }

    #[test]
    fn test_calendar_utc_timestamps() {
        let payload = encode(&ContentRecord::Calendar {
            title: "Launch; day".into(),
            location: Some("HQ".into()),
            description: None,
            start: Utc.with_ymd_and_hms(2026, 9, 1, 14, 30, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 9, 1, 15, 0, 0).unwrap(),
        })
        .unwrap();
        assert!(payload.contains("DTSTART:20260901T143000Z"));
        assert!(payload.contains("DTEND:20260901T150000Z"));
        assert!(payload.contains("SUMMARY:Launch\\; day"));
        assert!(payload.starts_with("BEGIN:VCALENDAR"));
        assert!(payload.ends_with("END:VCALENDAR"));
    }

    #[test]
    fn test_calendar_rejects_inverted_range() {
        let err = encode(&ContentRecord::Calendar {
            title: "Oops".into(),
            location: None,
            description: None,
            start: Utc.with_ymd_and_hms(2026, 9, 1, 15, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 9, 1, 14, 0, 0).unwrap(),
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { field: "end", .. }));
    }

    #[test]
    fn test_upi_omits_empty_optionals() {
        let payload = encode(&ContentRecord::Upi {
            vpa: "merchant@bank".into(),
            name: "Tea Stall".into(),
            amount: None,
            currency: Some("".into()),
            note: None,
        })
        .unwrap();
        assert_eq!(payload, "upi://pay?pa=merchant%40bank&pn=Tea%20Stall");
        assert!(!payload.contains("am="));
        assert!(!payload.contains("cu="));
    }

    #[test]
    fn test_upi_full_params() {
        let payload = encode(&ContentRecord::Upi {
            vpa: "merchant@bank".into(),
            name: "Tea Stall".into(),
            amount: Some("120.50".into()),
            currency: Some("INR".into()),
            note: Some("chai".into()),
        })
        .unwrap();
        assert_eq!(
            payload,
            "upi://pay?pa=merchant%40bank&pn=Tea%20Stall&am=120.50&cu=INR&tn=chai"
        );
    }

    #[test]
    fn test_upi_rejects_bad_amount() {
        let err = encode(&ContentRecord::Upi {
            vpa: "m@b".into(),
            name: "X".into(),
            amount: Some("-3".into()),
            currency: None,
            note: None,
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { field: "amount", .. }));
    }

    #[test]
    fn test_pix_structure_and_checksum() {
        let payload = encode(&ContentRecord::Pix {
            key: "chave@pix.br".into(),
            name: "Loja Azul".into(),
            city: "SAO PAULO".into(),
            amount: Some("10.5".into()),
            txid: None,
        })
        .unwrap();
        assert!(payload.starts_with("000201"));
        assert!(payload.contains("br.gov.bcb.pix"));
        assert!(payload.contains("5303986"));
        assert!(payload.contains("540510.50"));
        assert!(payload.contains("5802BR"));
        assert!(payload.contains("62070503***"));

        // Recompute the CRC over everything up to and including "6304".
        let tag_pos = payload.rfind("6304").unwrap();
        let (body, crc_hex) = payload.split_at(tag_pos + 4);
        assert_eq!(crc_hex.len(), 4);
        let expected = crc16_ccitt(body.as_bytes());
        assert_eq!(crc_hex, format!("{expected:04X}"));
    }

    #[test]
    fn test_pix_truncates_emv_display_fields() {
        let payload = encode(&ContentRecord::Pix {
            key: "k@p.br".into(),
            name: "A merchant name far beyond the EMV cap".into(),
            city: "A very long city name".into(),
            amount: None,
            txid: Some("TX123".into()),
        })
        .unwrap();
        assert!(payload.contains("5925A merchant name far beyon"));
        assert!(payload.contains("6015A very long cit"));
        assert!(payload.contains("0505TX123"));
    }

    #[test]
    fn test_crc16_ccitt_reference_vector() {
        // Classic CCITT-FALSE check value.
        assert_eq!(crc16_ccitt(b"123456789"), 0x29b1);
    }

    #[test]
    fn test_url_variants_validated() {
        let ok = encode(&ContentRecord::Link { url: "https://example.com/x".into() }).unwrap();
        assert_eq!(ok, "https://example.com/x");

        let err = encode(&ContentRecord::Link { url: "ftp://example.com".into() }).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { field: "url", .. }));

        let err = encode(&ContentRecord::Menu { url: "".into() }).unwrap_err();
        assert_eq!(err, Error::MissingField("url"));
    }

    #[test]
    fn test_dynamic_variants_encode_indirection_url_verbatim() {
        let payload = encode(&ContentRecord::MultiUrl {
            landing_url: "https://s.example/u/ab12".into(),
        })
        .unwrap();
        assert_eq!(payload, "https://s.example/u/ab12");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let record = ContentRecord::VCard {
            name: "Ada".into(),
            org: Some("Analytical".into()),
            title: None,
            phone: Some("+44 20 0000".into()),
            mobile: None,
            email: Some("ada@engine.test".into()),
            website: None,
            street: None,
            city: None,
            zip: None,
            country: None,
            note: None,
        };
        assert_eq!(encode(&record).unwrap(), encode(&record).unwrap());
    }
}
