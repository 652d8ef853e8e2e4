//! Sign-In Bar
//!
//! Minimal email/password affordance driving the auth provider. The
//! board itself only reacts to the identity signal.

use board_core::auth::AuthUser;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

#[component]
pub fn SignInBar(auth_user: ReadSignal<Option<AuthUser>>) -> impl IntoView {
    let ctx = use_app_context();
    let auth = ctx.auth.clone();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    view! {
        <div class="sign-in-bar">
            {move || match auth_user.get() {
                Some(user) => {
                    let auth = auth.clone();
                    let label = user.email.clone().unwrap_or_else(|| user.uid.clone());
                    view! {
                        <span class="user-label">{label}</span>
                        <button on:click=move |_| auth.sign_out()>"Sign out"</button>
                    }
                        .into_any()
                }
                None => {
                    let auth = auth.clone();
                    let on_sign_in = move |_| {
                        let auth = auth.clone();
                        let email = email.get_untracked();
                        let password = password.get_untracked();
                        set_error.set(None);
                        spawn_local(async move {
                            if let Err(e) = auth.sign_in_with_password(&email, &password).await {
                                set_error.set(Some(e.to_string()));
                            }
                        });
                    };
                    view! {
                        <input
                            type="email"
                            placeholder="email"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                        <input
                            type="password"
                            placeholder="password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <button on:click=on_sign_in>"Sign in"</button>
                        {move || error.get().map(|e| view! { <span class="auth-error">{e}</span> })}
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
