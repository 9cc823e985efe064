pub mod constants;
pub mod region;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
