//! Application layer - controllers and handlers.
//!
//! This layer drives domain rules through the ports. Controllers hold view
//! state for one surface (`&mut self`); handlers are stateless.

mod auth;
mod profile_editor;
mod profile_prompt;
mod session_gate;
mod view_scope;
mod wizard_controller;

pub use auth::{AuthError, AuthHandler, LoginCommand, LoginResult};
pub use profile_editor::{EditorError, ProfileEditor};
pub use profile_prompt::{ProfilePrompt, PROMPT_TITLE};
pub use session_gate::SessionGate;
pub use view_scope::ViewScope;
pub use wizard_controller::{
    CompletionResult, StepOutcome, WizardController, WizardError, WizardPorts, LEAVE_WARNING,
};
