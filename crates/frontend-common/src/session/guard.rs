//! Route guard for signed-in-only pages

use super::hooks::use_session;
use super::redirect;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RequireSessionProps {
    #[prop_or_default]
    pub children: Children,
}

/// Renders children only for an authenticated session.
///
/// Anyone else is sent to the role-appropriate login page once the mount
/// check settles; until then nothing is rendered, so protected content
/// never flashes.
#[function_component(RequireSession)]
pub fn require_session(props: &RequireSessionProps) -> Html {
    let session = use_session();

    {
        let role = session.role;
        use_effect_with(
            (session.is_authenticated, session.is_loading),
            move |(authenticated, loading)| {
                if !loading && !authenticated {
                    redirect::to_login(role);
                }
            },
        );
    }

    if session.is_loading || !session.is_authenticated {
        return html! {};
    }

    html! { <>{ props.children.clone() }</> }
}
