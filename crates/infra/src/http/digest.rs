//! HTTP Digest access authentication (RFC 2617 / RFC 7616)
//!
//! Only the client side is implemented: parse a `WWW-Authenticate: Digest`
//! challenge and compute the matching `Authorization` header. `qop=auth`
//! and the legacy no-qop form are supported; `auth-int` is not.

use md5::Md5;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Hash function named by the challenge's `algorithm` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Md5,
    Md5Sess,
    Sha256,
    Sha256Sess,
}

impl DigestAlgorithm {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "MD5" => Some(Self::Md5),
            "MD5-SESS" => Some(Self::Md5Sess),
            "SHA-256" => Some(Self::Sha256),
            "SHA-256-SESS" => Some(Self::Sha256Sess),
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Md5Sess => "MD5-sess",
            Self::Sha256 => "SHA-256",
            Self::Sha256Sess => "SHA-256-sess",
        }
    }

    const fn is_session(self) -> bool {
        matches!(self, Self::Md5Sess | Self::Sha256Sess)
    }

    fn hash(self, data: &str) -> String {
        match self {
            Self::Md5 | Self::Md5Sess => hex::encode(Md5::digest(data.as_bytes())),
            Self::Sha256 | Self::Sha256Sess => hex::encode(Sha256::digest(data.as_bytes())),
        }
    }
}

/// Parameters of a `WWW-Authenticate: Digest ...` challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestChallenge {
    pub realm: String,
    pub nonce: String,
    pub opaque: Option<String>,
    pub algorithm: DigestAlgorithm,
    /// `Some("auth")` when the server offers it; `None` selects the legacy
    /// RFC 2069 computation.
    pub qop: Option<String>,
}

impl DigestChallenge {
    /// Parse a `WWW-Authenticate` header value.
    ///
    /// Returns `None` for non-digest schemes, a missing nonce, an
    /// unsupported algorithm, or a qop list that doesn't include `auth`.
    #[must_use]
    pub fn parse(header: &str) -> Option<Self> {
        let header = header.trim();
        let (scheme, params) = header.split_once(char::is_whitespace)?;
        if !scheme.eq_ignore_ascii_case("digest") {
            return None;
        }

        let mut realm = String::new();
        let mut nonce = None;
        let mut opaque = None;
        let mut algorithm = DigestAlgorithm::Md5;
        let mut qop = None;

        for (key, value) in parse_params(params) {
            match key.to_ascii_lowercase().as_str() {
                "realm" => realm = value,
                "nonce" => nonce = Some(value),
                "opaque" => opaque = Some(value),
                "algorithm" => algorithm = DigestAlgorithm::parse(&value)?,
                "qop" => {
                    let offers_auth = value.split(',').any(|q| q.trim().eq_ignore_ascii_case("auth"));
                    if !offers_auth {
                        return None;
                    }
                    qop = Some("auth".to_string());
                }
                _ => {}
            }
        }

        Some(Self { realm, nonce: nonce?, opaque, algorithm, qop })
    }

    /// Build the `Authorization` header value for one request.
    ///
    /// `uri` is the request target as sent on the request line (path plus
    /// query). `nc` counts requests made with this nonce, starting at 1.
    #[must_use]
    pub fn authorization(
        &self,
        username: &str,
        password: &str,
        method: &str,
        uri: &str,
        cnonce: &str,
        nc: u32,
    ) -> String {
        let nc = format!("{nc:08x}");
        let response = self.response(username, password, method, uri, cnonce, &nc);

        let mut header = format!(
            "Digest username=\"{}\", realm=\"{}\", nonce=\"{}\", uri=\"{}\", algorithm={}, response=\"{}\"",
            escape(username),
            escape(&self.realm),
            escape(&self.nonce),
            escape(uri),
            self.algorithm.as_str(),
            response
        );

        if let Some(qop) = &self.qop {
            header.push_str(&format!(", qop={qop}, nc={nc}, cnonce=\"{}\"", escape(cnonce)));
        }
        if let Some(opaque) = &self.opaque {
            header.push_str(&format!(", opaque=\"{}\"", escape(opaque)));
        }
        header
    }

    fn response(
        &self,
        username: &str,
        password: &str,
        method: &str,
        uri: &str,
        cnonce: &str,
        nc: &str,
    ) -> String {
        let algorithm = self.algorithm;

        let mut ha1 = algorithm.hash(&format!("{username}:{}:{password}", self.realm));
        if algorithm.is_session() {
            ha1 = algorithm.hash(&format!("{ha1}:{}:{cnonce}", self.nonce));
        }
        let ha2 = algorithm.hash(&format!("{method}:{uri}"));

        match &self.qop {
            Some(qop) => {
                algorithm.hash(&format!("{ha1}:{}:{nc}:{cnonce}:{qop}:{ha2}", self.nonce))
            }
            None => algorithm.hash(&format!("{ha1}:{}:{ha2}", self.nonce)),
        }
    }
}

/// Random client nonce.
#[must_use]
pub fn generate_cnonce() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Split `key=value, key="quoted, value"` pairs.
fn parse_params(input: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace() || *c == ',') {
            chars.next();
        }

        let key: String = chars.by_ref().take_while(|c| *c != '=').collect();
        let key = key.trim().to_string();
        if key.is_empty() {
            break;
        }

        let mut value = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            value.push(escaped);
                        }
                    }
                    '"' => break,
                    other => value.push(other),
                }
            }
        } else {
            while let Some(c) = chars.peek() {
                if *c == ',' {
                    break;
                }
                value.push(*c);
                chars.next();
            }
            value = value.trim().to_string();
        }

        params.push((key, value));
    }

    params
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
