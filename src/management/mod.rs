mod session;

pub use session::AuthFlowController;
pub use session::Session;
pub use session::SessionState;
