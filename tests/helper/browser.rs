//! Browser test double

use std::cell::RefCell;

use updatecraft::browser::{Browser, BrowserError};

/// Records opened URLs instead of launching anything
#[derive(Default)]
pub struct RecordingBrowser {
    opened: RefCell<Vec<String>>,
}

impl RecordingBrowser {
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Browser for RecordingBrowser {
    fn open(&self, url: &str) -> Result<(), BrowserError> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}
