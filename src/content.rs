//! Structured content model for QR payloads.
//!
//! A [`ContentRecord`] is a tagged union over the nineteen content types the
//! product supports. Each variant carries only the fields its payload grammar
//! needs; the encoder dispatch in [`crate::encode`] matches exhaustively, so
//! adding a twentieth variant is a compile-time change.
//!
//! Records arrive from the dashboard UI as JSON with a `"type"` tag, e.g.:
//!
//! ```json
//! { "type": "wifi", "ssid": "HomeNet", "password": "hunter2", "auth": "wpa" }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// WiFi authentication scheme, as named by the `WIFI:` grammar's `T:` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WifiAuth {
    Wpa,
    Wep,
    Nopass,
}

impl WifiAuth {
    /// The token emitted into the `T:` field.
    pub fn token(self) -> &'static str {
        match self {
            WifiAuth::Wpa => "WPA",
            WifiAuth::Wep => "WEP",
            WifiAuth::Nopass => "nopass",
        }
    }
}

/// Whether a symbol's payload is baked in or routed through a backend-owned
/// indirection URL.
///
/// `Dynamic` symbols encode a stable short URL whose destination the backend
/// can change after printing. The encoder never sees the destination; it only
/// ever encodes the indirection URL itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Static,
    Dynamic,
}

/// A validated content record: exactly one variant active, carrying the
/// fields relevant to that variant's payload grammar.
///
/// Field-level validation happens in the encoder (never trust the caller);
/// this type only fixes the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentRecord {
    /// A plain URL payload.
    Link { url: String },

    /// Contact card, emitted as a vCard 3.0 text block.
    #[serde(rename = "vcard")]
    VCard {
        name: String,
        #[serde(default)]
        org: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        phone: Option<String>,
        #[serde(default)]
        mobile: Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        website: Option<String>,
        #[serde(default)]
        street: Option<String>,
        #[serde(default)]
        city: Option<String>,
        #[serde(default)]
        zip: Option<String>,
        #[serde(default)]
        country: Option<String>,
        #[serde(default)]
        note: Option<String>,
    },

    /// Network credentials, emitted in the `WIFI:` grammar.
    Wifi {
        ssid: String,
        #[serde(default)]
        password: String,
        auth: WifiAuth,
        #[serde(default)]
        hidden: bool,
    },

    /// Pre-addressed email, emitted as a `mailto:` URL.
    Email {
        address: String,
        #[serde(default)]
        subject: Option<String>,
        #[serde(default)]
        body: Option<String>,
    },

    /// Pre-filled text message, emitted in the `SMSTO:` grammar.
    Sms {
        phone: String,
        #[serde(default)]
        message: Option<String>,
    },

    /// Dialable number, emitted as a `tel:` URL.
    Phone { phone: String },

    /// Literal text payload.
    Text { text: String },

    /// Calendar event, emitted as an iCalendar `VEVENT` block.
    ///
    /// Timestamps are UTC by type; local-time input is the caller's bug to
    /// fix before constructing the record.
    Calendar {
        title: String,
        #[serde(default)]
        location: Option<String>,
        #[serde(default)]
        description: Option<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Geographic coordinates, emitted as a `geo:` URI.
    Location { latitude: f64, longitude: f64 },

    /// UPI payment request, emitted as a `upi://pay` URL.
    Upi {
        /// Virtual payment address (payee).
        vpa: String,
        /// Payee display name.
        name: String,
        #[serde(default)]
        amount: Option<String>,
        #[serde(default)]
        currency: Option<String>,
        #[serde(default)]
        note: Option<String>,
    },

    /// PIX payment request, emitted as an EMV BR Code TLV string.
    Pix {
        /// PIX key (CPF/CNPJ, phone, email, or random key).
        key: String,
        /// Merchant/recipient name (EMV limit 25 chars, truncated).
        name: String,
        /// Merchant city (EMV limit 15 chars, truncated).
        city: String,
        #[serde(default)]
        amount: Option<String>,
        #[serde(default)]
        txid: Option<String>,
    },

    /// Product page URL.
    Product { url: String },

    /// Restaurant menu URL.
    Menu { url: String },

    /// Hosted document URL.
    Document { url: String },

    /// Hosted PDF URL.
    Pdf { url: String },

    /// App download link: a backend-hosted fallback URL that redirects by
    /// user agent. Always dynamic.
    AppStore { fallback_url: String },

    /// Multi-link landing page hosted by the backend. The sub-links live
    /// out-of-band; the symbol only ever carries the landing URL. Always
    /// dynamic.
    MultiUrl { landing_url: String },

    /// Social-profile landing page hosted by the backend. Always dynamic.
    Social { landing_url: String },

    /// Serial-number lookup URL minted by the backend. Always dynamic.
    Serial { url: String },
}

impl ContentRecord {
    /// Whether this record's payload is a backend-owned indirection URL.
    ///
    /// `MultiUrl`, `Social`, `AppStore` and `Serial` only exist behind the
    /// redirect service, so they are dynamic by construction; every other
    /// variant is static unless the caller routes it through a short URL
    /// before building the record.
    pub fn mode(&self) -> Mode {
        match self {
            ContentRecord::MultiUrl { .. }
            | ContentRecord::Social { .. }
            | ContentRecord::AppStore { .. }
            | ContentRecord::Serial { .. } => Mode::Dynamic,
            _ => Mode::Static,
        }
    }

    /// The record's type tag, as it appears on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            ContentRecord::Link { .. } => "link",
            ContentRecord::VCard { .. } => "vcard",
            ContentRecord::Wifi { .. } => "wifi",
            ContentRecord::Email { .. } => "email",
            ContentRecord::Sms { .. } => "sms",
            ContentRecord::Phone { .. } => "phone",
            ContentRecord::Text { .. } => "text",
            ContentRecord::Calendar { .. } => "calendar",
            ContentRecord::Location { .. } => "location",
            ContentRecord::Upi { .. } => "upi",
            ContentRecord::Pix { .. } => "pix",
            ContentRecord::Product { .. } => "product",
            ContentRecord::Menu { .. } => "menu",
            ContentRecord::Document { .. } => "document",
            ContentRecord::Pdf { .. } => "pdf",
            ContentRecord::AppStore { .. } => "app_store",
            ContentRecord::MultiUrl { .. } => "multi_url",
            ContentRecord::Social { .. } => "social",
            ContentRecord::Serial { .. } => "serial",
        }
    }
}
