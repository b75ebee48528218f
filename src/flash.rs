use actix_session::Session;

const FLASH_KEY: &str = "flash";
const ERROR_KEY: &str = "flash_error";

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Info(String),
    Error(String),
}

impl Flash {
    pub fn message(&self) -> &str {
        match self {
            Flash::Info(m) | Flash::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Flash::Error(_))
    }
}

pub fn set_flash(session: &Session, message: &str) {
    store(session, FLASH_KEY, message);
}

pub fn set_error(session: &Session, message: &str) {
    store(session, ERROR_KEY, message);
}

fn store(session: &Session, key: &str, message: &str) {
    if let Err(e) = session.insert(key, message) {
        log::error!("Failed to store flash message under {key}: {e}");
    }
}

/// Take the pending message, errors first. Both slots are cleared.
pub fn take_flash(session: &Session) -> Option<Flash> {
    let error = session.get::<String>(ERROR_KEY).unwrap_or(None);
    let info = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if error.is_some() {
        session.remove(ERROR_KEY);
    }
    if info.is_some() {
        session.remove(FLASH_KEY);
    }
    error.map(Flash::Error).or(info.map(Flash::Info))
}
