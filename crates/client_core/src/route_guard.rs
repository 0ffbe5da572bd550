/// Screen that unauthenticated users are sent to.
pub const LOGIN_REDIRECT_TARGET: &str = "Product Management";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Protected,
    Redirect(&'static str),
}

pub fn guard(logged_in: bool) -> Route {
    if logged_in {
        Route::Protected
    } else {
        Route::Redirect(LOGIN_REDIRECT_TARGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_in_user_reaches_protected_screen() {
        assert_eq!(guard(true), Route::Protected);
    }

    #[test]
    fn anonymous_user_is_redirected() {
        assert_eq!(guard(false), Route::Redirect("Product Management"));
    }
}
