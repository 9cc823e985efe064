use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating login names
    /// Letters, digits and the characters `-._@+`, so e-mail addresses are accepted
    /// - Valid: "jane.doe@example.com", "gardener_1", "a+b"
    /// - Invalid: "jane doe", "jane!", "名前"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9\-._@+]+$").unwrap();
}
