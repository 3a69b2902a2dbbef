//! Notice Banner Component
//!
//! Dismissible message strip above the page content.

use leptos::prelude::*;

use crate::context::{use_app, NoticeKind};

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_app();

    move || {
        ctx.notice.get().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Error => "notice notice-error",
                NoticeKind::Success => "notice notice-success",
            };
            view! {
                <div class=class role="alert">
                    <span class="notice-text">{notice.message}</span>
                    <button class="notice-close" on:click=move |_| ctx.dismiss_notice()>"×"</button>
                </div>
            }
        })
    }
}
