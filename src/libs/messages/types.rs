/// Every user-facing text of the application.
///
/// Variants carry the dynamic parts; the wording lives in `display.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // === AUTHENTICATION MESSAGES ===
    LoginSucceeded(String), // email
    LoginFailed,
    SignupSucceeded(String), // email
    SignupFailed,
    LogoutSucceeded,
    LogoutFailed,
    NotLoggedIn,
    SessionValid(String), // identity
    SessionInvalid,

    // === TODO MESSAGES ===
    TodoCreated(String),        // item
    TodoCompleted(String),      // item
    TodoReopened(String),       // item
    TodoDeleted(String),        // item
    TodoNotFound(String),       // id or position
    TodosEmpty,
    TodosHeader,
    OpenItems(usize),
    InvalidTodoItem(String), // validation text

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleApi,

    // === ERROR MESSAGES ===
    RequestFailed(String), // error

    // === PROMPTS ===
    PromptEmail,
    PromptPassword,
    PromptConfirmPassword,
    PasswordMismatch,
    PromptApiUrl,
    PromptRequestTimeout,
    PromptSessionTtl,
    ValueMustBePositive,
}
