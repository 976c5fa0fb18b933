//! Human readable documentation for the most frequently used status codes.
//!
//! Lookup ([`explain`]) is kept separate from presentation: an [`Explanation`] can be rendered
//! as plain text through [`Display`](fmt::Display), as a styled HTML block with
//! [`Explanation::to_html`], or as JSON with [`Explanation::to_json`].

use std::{fmt, io};

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCodeEntry {
    pub code: u16,
    pub name: &'static str,
    pub description: &'static str,
}

static_assertions::assert_impl_all!(StatusCodeEntry: Send, Sync);

/// Shown when a code has no entry
pub const NO_EXPLANATION: &str = "Sorry, we have no explanation available for the request code!!";

const FOUND_STYLE: &str = "background: #000; color: #eee; border: 2px solid #09f";
const NOT_FOUND_STYLE: &str = "background: wheat; border: 2px solid #cd5c5c";

pub static STATUS_CODE_ENTRIES: [StatusCodeEntry; 11] = [
    StatusCodeEntry {
        code: 200,
        name: "HTTP_OK",
        description: "General success status code. This is the most common code. Used to indicate success.",
    },
    StatusCodeEntry {
        code: 201,
        name: "HTTP_CREATED",
        description: "Successful creation occurred (via either POST or PUT). Set the Location header to contain a link to the newly-created resource (on POST). Response body content may or may not be present.",
    },
    StatusCodeEntry {
        code: 204,
        name: "HTTP_NO_CONTENT",
        description: "Indicates success but nothing is in the response body, often used for DELETE and PUT operations.",
    },
    StatusCodeEntry {
        code: 400,
        name: "HTTP_BAD_REQUEST",
        description: "General error for when fulfilling the request would cause an invalid state. Domain validation errors, missing data, etc. are some examples.",
    },
    StatusCodeEntry {
        code: 401,
        name: "HTTP_UNAUTHORIZED",
        description: "Error code response for missing or invalid authentication token.",
    },
    StatusCodeEntry {
        code: 403,
        name: "HTTP_FORBIDDEN",
        description: "Error code for when the user is not authorized to perform the operation or the resource is unavailable for some reason (e.g. time constraints, etc.).",
    },
    StatusCodeEntry {
        code: 404,
        name: "HTTP_NOT_FOUND",
        description: "Used when the requested resource is not found, whether it doesn't exist or if there was a 401 or 403 that, for security reasons, the service wants to mask.",
    },
    StatusCodeEntry {
        code: 405,
        name: "HTTP_METHOD_NOT_ALLOWED",
        description: "Used to indicate that the requested URL exists, but the requested HTTP method is not applicable. For example, POST /users/12345 where the API doesn't support creation of resources this way (with a provided ID). The Allow HTTP header must be set when returning a 405 to indicate the HTTP methods that are supported. In the previous case, the header would look like \"Allow: GET, PUT, DELETE\".",
    },
    StatusCodeEntry {
        code: 409,
        name: "HTTP_CONFLICT",
        description: "Whenever a resource conflict would be caused by fulfilling the request. Duplicate entries, such as trying to create two customers with the same information, and deleting root objects when cascade-delete is not supported are a couple of examples.",
    },
    StatusCodeEntry {
        code: 500,
        name: "HTTP_INTERNAL_SERVER_ERROR",
        description: "Never return this intentionally. The general catch-all error when the server-side throws an exception. Use this only for errors that the consumer cannot address from their end.",
    },
    StatusCodeEntry {
        code: 503,
        name: "HTTP_SERVICE_UNAVAILABLE",
        description: "Usually a temporary error message shown by an API.",
    },
];

pub fn entries() -> &'static [StatusCodeEntry] {
    &STATUS_CODE_ENTRIES
}

pub fn lookup(code: i64) -> Option<&'static StatusCodeEntry> {
    STATUS_CODE_ENTRIES
        .iter()
        .find(|entry| i64::from(entry.code) == code)
}

/// The result of [`explain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Explanation {
    One(&'static StatusCodeEntry),
    All(&'static [StatusCodeEntry]),
    /// The requested code has no entry
    Unknown(i64),
}

/// Explains `code`, or every known code when `None`
pub fn explain(code: Option<i64>) -> Explanation {
    match code {
        None => Explanation::All(entries()),
        Some(code) => match lookup(code) {
            Some(entry) => Explanation::One(entry),
            None => {
                log::debug!("no explanation for status code {code}");
                Explanation::Unknown(code)
            }
        },
    }
}

/// Writes the HTML rendering of [`explain`] to `out`
pub fn explain_to<W: io::Write + ?Sized>(code: Option<i64>, out: &mut W) -> io::Result<()> {
    out.write_all(explain(code).to_html().as_bytes())
}

impl Explanation {
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    pub fn entries(&self) -> &'static [StatusCodeEntry] {
        match self {
            Self::One(entry) => std::slice::from_ref(*entry),
            Self::All(entries) => *entries,
            Self::Unknown(_) => &[],
        }
    }

    /// A `<pre>` block, styled differently for unknown codes
    pub fn to_html(&self) -> String {
        let style = if self.is_found() {
            FOUND_STYLE
        } else {
            NOT_FOUND_STYLE
        };
        format!(
            "<pre style=\"padding: 1rem; max-width: 750px; margin: 50px auto; border-radius: 3px; overflow-x: scroll; {style}\">{}</pre>",
            escape_html(&self.to_string())
        )
    }

    /// The entry as an object, every entry as an array, or null
    pub fn to_json(&self) -> Value {
        match self {
            Self::One(entry) => entry_json(entry),
            Self::All(entries) => Value::Array(entries.iter().map(entry_json).collect()),
            Self::Unknown(_) => Value::Null,
        }
    }
}

fn entry_json(entry: &StatusCodeEntry) -> Value {
    serde_json::json!({
        "code": entry.code,
        "name": entry.name,
        "description": entry.description,
    })
}

impl fmt::Display for StatusCodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}\n    {}", self.code, self.name, self.description)
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::Unknown(_) = self {
            return f.write_str(NO_EXPLANATION);
        }
        for (i, entry) in self.entries().iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            fmt::Display::fmt(entry, f)?;
        }
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
