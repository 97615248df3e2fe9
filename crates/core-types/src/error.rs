use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid month key '{0}': expected YYYY-MM")]
    InvalidMonthKey(String),
}
