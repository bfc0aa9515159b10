use leptos::prelude::*;

/// Sub-tab strip bound to a single active value
#[component]
pub fn SubTabs<T>(
    items: &'static [T],
    active: RwSignal<T>,
    label: fn(&T) -> &'static str,
) -> impl IntoView
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    view! {
        <div class="sub-tabs">
            {items
                .iter()
                .copied()
                .map(|item| {
                    view! {
                        <button
                            class="sub-tabs__item"
                            class:active=move || active.get() == item
                            on:click=move |_| {
                                if active.get_untracked() != item {
                                    active.set(item);
                                }
                            }
                        >
                            {label(&item)}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
