//! Read-time conversions from raw strings to typed values.
//!
//! Every conversion is strict: a value is accepted only when it is the
//! canonical text of the converted result. Numbers and base64 are parsed and
//! reformatted, and the reformatted text must equal the stored text.

use super::key_path;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use url::Url;

/// A strict conversion from a stored string to `T`.
pub(crate) struct Conversion<T> {
    /// Type name used in `BadType` errors.
    pub expected: &'static str,
    pub parse: fn(&str) -> Option<T>,
    /// Renders the offending value for an error message.
    pub preview: fn(&str) -> String,
}

pub(crate) const STRING: Conversion<String> = Conversion {
    expected: "string",
    parse: parse_string,
    preview: key_path::preview,
};

pub(crate) const INTEGER: Conversion<i64> = Conversion {
    expected: "integer",
    parse: parse_integer,
    preview: key_path::preview,
};

pub(crate) const FLOAT: Conversion<f64> = Conversion {
    expected: "float",
    parse: parse_float,
    preview: key_path::preview,
};

pub(crate) const BOOLEAN: Conversion<bool> = Conversion {
    expected: "boolean",
    parse: parse_boolean,
    preview: key_path::preview,
};

pub(crate) const ENABLED: Conversion<bool> = Conversion {
    expected: "enabled boolean",
    parse: parse_enabled,
    preview: key_path::preview,
};

pub(crate) const BASE64: Conversion<Vec<u8>> = Conversion {
    expected: "base64",
    parse: parse_base64,
    preview: key_path::masked_preview,
};

pub(crate) const URL: Conversion<Url> = Conversion {
    expected: "URL",
    parse: parse_url,
    preview: key_path::preview,
};

fn parse_string(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn parse_integer(value: &str) -> Option<i64> {
    let parsed: i64 = value.parse().ok()?;
    (parsed.to_string() == value).then_some(parsed)
}

fn parse_float(value: &str) -> Option<f64> {
    let parsed: f64 = value.parse().ok()?;
    (parsed.is_finite() && parsed.to_string() == value).then_some(parsed)
}

fn parse_boolean(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_enabled(value: &str) -> Option<bool> {
    match value {
        "enabled" => Some(true),
        "disabled" => Some(false),
        _ => None,
    }
}

fn parse_base64(value: &str) -> Option<Vec<u8>> {
    let decoded = STANDARD.decode(value).ok()?;
    (STANDARD.encode(&decoded) == value).then_some(decoded)
}

fn parse_url(value: &str) -> Option<Url> {
    Url::parse(value).ok()
}
