// Router module: which screen the UI loop shows, and which role the main
// screen is in.

/// Top-level screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Register,
    Main,
}

/// Events that move the app between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    ShowRegister,
    ShowLogin,
    LoggedIn,
    Registered,
    LoggedOut,
}

impl Screen {
    /// Apply `transition`. Transitions that make no sense on the current
    /// screen leave it unchanged.
    pub fn next(self, transition: Transition) -> Screen {
        use Transition::*;
        match (self, transition) {
            (Screen::Login, ShowRegister) => Screen::Register,
            (Screen::Login, LoggedIn) => Screen::Main,
            (Screen::Register, ShowLogin | Registered) => Screen::Login,
            (Screen::Main, LoggedOut) => Screen::Login,
            (screen, _) => screen,
        }
    }
}

/// Main-screen role: sellers manage listings, buyers browse and chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Seller,
    Buyer,
}

impl Role {
    pub fn toggle(self) -> Role {
        match self {
            Role::Seller => Role::Buyer,
            Role::Buyer => Role::Seller,
        }
    }

    /// Label for the menu entry that flips the role.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Role::Seller => "Switch to Buyer",
            Role::Buyer => "Switch to Seller",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_login_as_seller() {
        assert_eq!(Screen::default(), Screen::Login);
        assert_eq!(Role::default(), Role::Seller);
    }

    #[test]
    fn login_register_main_flow() {
        let screen = Screen::Login.next(Transition::ShowRegister);
        assert_eq!(screen, Screen::Register);
        let screen = screen.next(Transition::Registered);
        assert_eq!(screen, Screen::Login);
        let screen = screen.next(Transition::LoggedIn);
        assert_eq!(screen, Screen::Main);
        assert_eq!(screen.next(Transition::LoggedOut), Screen::Login);
    }

    #[test]
    fn register_back_returns_to_login() {
        assert_eq!(Screen::Register.next(Transition::ShowLogin), Screen::Login);
    }

    #[test]
    fn invalid_transitions_are_ignored() {
        assert_eq!(Screen::Register.next(Transition::LoggedIn), Screen::Register);
        assert_eq!(Screen::Main.next(Transition::ShowRegister), Screen::Main);
        assert_eq!(Screen::Login.next(Transition::LoggedOut), Screen::Login);
    }

    #[test]
    fn role_toggles_and_labels_the_other_role() {
        assert_eq!(Role::Seller.toggle(), Role::Buyer);
        assert_eq!(Role::Buyer.toggle(), Role::Seller);
        assert_eq!(Role::Seller.toggle_label(), "Switch to Buyer");
        assert_eq!(Role::Buyer.toggle_label(), "Switch to Seller");
    }
}
