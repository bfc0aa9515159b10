use chrono::{Datelike, Local};
use contracts::dashboard::calendar::{month_grid, month_title, shift_month};
use contracts::dashboard::messaging::NoticeLevel;
use contracts::shared::portal::PORTAL_NAME;
use leptos::prelude::*;

use crate::layout::global_context::use_global_context;
use crate::shared::whatsapp::contact_phone;
use crate::system::auth::context::use_auth;

const CONTACT_MESSAGE: &str = "Hello from Apotek Alpro BPT Portal! I would like to get in touch with the marketing team.";

#[component]
fn MonthCalendar() -> impl IntoView {
    let today = Local::now().date_naive();
    let (month, set_month) = signal((today.year(), today.month()));

    let shift = move |delta: i32| {
        set_month.update(|(y, m)| {
            let (ny, nm) = shift_month(*y, *m, delta);
            *y = ny;
            *m = nm;
        })
    };

    view! {
        <div class="calendar">
            <div class="calendar__header">
                <button class="calendar__nav" on:click=move |_| shift(-1)>"‹"</button>
                <span class="calendar__title">
                    {move || {
                        let (y, m) = month.get();
                        month_title(y, m)
                    }}
                </span>
                <button class="calendar__nav" on:click=move |_| shift(1)>"›"</button>
            </div>
            <div class="calendar__weekdays">
                {["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                    .into_iter()
                    .map(|d| view! { <span>{d}</span> })
                    .collect_view()}
            </div>
            <div class="calendar__days">
                {move || {
                    let (y, m) = month.get();
                    month_grid(y, m, today)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|day| {
                            view! {
                                <span
                                    class="calendar__day"
                                    class:calendar__day--other={!day.in_month}
                                    class:calendar__day--today={day.is_today}
                                >
                                    {day.date.day()}
                                </span>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
pub fn HomepagePane() -> impl IntoView {
    let ctx = use_global_context();
    let (auth_state, _) = use_auth();
    let user = move || auth_state.get().user;

    let contact = move |_| {
        let phone = ctx.portal.with_untracked(|p| p.whatsapp.homepage_phone.clone());
        ctx.notify(NoticeLevel::Success, "Opening WhatsApp...");
        contact_phone(ctx, &phone, CONTACT_MESSAGE);
    };

    view! {
        <div class="pane pane--homepage">
            <div class="welcome-card">
                <h2>
                    "Welcome, "
                    {move || user().map(|u| u.display_name).unwrap_or_default()}
                    "!"
                </h2>
                <p>{PORTAL_NAME}</p>
            </div>

            <div class="homepage-grid">
                <div class="info-card">
                    <h3>"👤 Account"</h3>
                    {move || user().map(|u| {
                        let login_time = u
                            .login_time
                            .with_timezone(&Local)
                            .format("%d %b %Y %H:%M")
                            .to_string();
                        view! {
                            <dl class="info-card__list">
                                <dt>"Type"</dt>
                                <dd>{u.login_type.badge()}</dd>
                                <dt>"Name"</dt>
                                <dd>{u.display_name}</dd>
                                <dt>"Store"</dt>
                                <dd>{u.full_store_name}</dd>
                                <dt>"AM / Role"</dt>
                                <dd>{u.am}</dd>
                                <dt>"Logged in"</dt>
                                <dd>{login_time}</dd>
                            </dl>
                        }
                    })}
                </div>

                <div class="info-card">
                    <h3>"📅 Calendar"</h3>
                    <MonthCalendar />
                </div>

                <div class="info-card info-card--contact">
                    <h3>"💬 Contact Marketing"</h3>
                    <p>"Questions about campaigns or partnerships? Reach the marketing team on WhatsApp."</p>
                    <button class="btn-whatsapp" data-whatsapp-direct="" on:click=contact>
                        "Contact via WhatsApp"
                    </button>
                </div>
            </div>
        </div>
    }
}
