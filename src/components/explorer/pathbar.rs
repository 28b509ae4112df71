//! Path bar component (Finder style).
//!
//! Displays the breadcrumb of the current folder at the bottom of the
//! explorer; every segment but the last navigates.

use leptos::prelude::*;
use leptos_icons::Icon;
use netdisk_core::{Crumb, DepthIndicator};

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::actions;

stylance::import_crate_style!(css, "src/components/explorer/pathbar.module.css");

/// Path bar component displayed at the bottom of the explorer.
#[component]
pub fn PathBar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    view! {
        <nav class=css::pathbar>
            {move || {
                let crumbs = ctx.explorer.breadcrumb.get();
                let last = crumbs.len().saturating_sub(1);

                crumbs
                    .into_iter()
                    .enumerate()
                    .map(|(idx, crumb)| {
                        let icon = if idx == 0 { ic::HOME } else { ic::FOLDER };
                        view! {
                            <>
                                {(idx > 0).then(|| view! {
                                    <span class=css::separator>
                                        <Icon icon=ic::CHEVRON_RIGHT />
                                    </span>
                                })}
                                {if idx == last {
                                    view! { <SegmentCurrent icon=icon label=crumb.name /> }.into_any()
                                } else {
                                    view! { <SegmentLink icon=icon crumb=crumb /> }.into_any()
                                }}
                            </>
                        }
                    })
                    .collect_view()
            }}
            <DepthBadge />
        </nav>
    }
}

/// Clickable path segment.
#[component]
fn SegmentLink(icon: icondata::Icon, crumb: Crumb) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let Crumb { name, path } = crumb;

    view! {
        <button
            class=css::segment
            on:click=move |_| actions::navigate(ctx, path.clone())
        >
            <span class=css::icon><Icon icon=icon /></span>
            <span class=css::label>{name}</span>
        </button>
    }
}

/// Current (disabled) path segment.
#[component]
fn SegmentCurrent(icon: icondata::Icon, label: String) -> impl IntoView {
    view! {
        <button class=format!("{} {}", css::segment, css::segmentCurrent) disabled=true>
            <span class=css::icon><Icon icon=icon /></span>
            <span class=css::label>{label}</span>
        </button>
    }
}

/// `current/max` depth, hidden for users without a limit.
#[component]
fn DepthBadge() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let depth = ctx.explorer.depth;

    let badge_class = move || {
        if depth.with(DepthIndicator::at_limit) {
            format!("{} {}", css::depth, css::depthLimit)
        } else {
            css::depth.to_string()
        }
    };

    view! {
        <Show when=move || depth.with(DepthIndicator::is_visible)>
            <span class=badge_class title="Folder depth">
                <span class=css::icon><Icon icon=ic::DEPTH /></span>
                {move || {
                    let d = depth.get();
                    format!("{}/{}", d.current, d.max)
                }}
            </span>
        </Show>
    }
}
