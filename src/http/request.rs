/// A tokenized HTTP request line.
///
/// Tokens the client never sent stay empty so the access log can still show
/// whatever was parsed before the request was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub uri: String,
    pub version: String,
    token_count: usize,
}

impl RequestLine {
    /// Splits a raw request line strictly on tab, space, CR and LF.
    ///
    /// Runs of separators collapse; validation decides whether the token
    /// count is acceptable.
    pub fn parse(line: &str) -> Self {
        let tokens: Vec<&str> = line
            .split(['\t', ' ', '\r', '\n'])
            .filter(|t| !t.is_empty())
            .collect();

        let token = |i: usize| tokens.get(i).copied().unwrap_or("").to_string();

        Self {
            method: token(0),
            uri: token(1),
            version: token(2),
            token_count: tokens.len(),
        }
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }
}
