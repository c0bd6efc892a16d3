use std::error;
use std::fmt;

#[derive(Debug, Clone)]
pub struct CollectorError {
    message: String
}

impl CollectorError {
    pub fn new(message: String) -> CollectorError {
        CollectorError { message }
    }
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl error::Error for CollectorError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        // Message-only error, underlying cause isn't tracked.
        None
    }
}
