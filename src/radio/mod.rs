pub(crate) mod ap;
pub(crate) mod session;

pub use ap::{ap_mode_config, ApProfile};
pub use session::install_link_event_handlers;
pub(crate) use session::RadioSession;
