//! Countdown Panel Component
//!
//! Date picker, four countdown fields and a three-day calendar strip. The
//! chosen date survives reloads through local storage.

use chrono::Local;
use leptos::prelude::*;

use crate::countdown::{Countdown, Reading};
use crate::dom;
use crate::storage;
use crate::timer::Repeating;

const TICK_MS: u32 = 1000;

/// Recompute now, and keep ticking every second while time remains
fn refresh(countdown: Countdown, reading: RwSignal<Reading>, ticker: &Repeating) {
    ticker.stop();
    let current = countdown.reading(&Local::now());
    reading.set(current);
    if current.is_running() {
        ticker.start(TICK_MS, move || {
            let next = countdown.reading(&Local::now());
            reading.set(next);
            next.is_running()
        });
    }
}

fn restore() -> (Countdown, Option<String>) {
    match storage::local_storage() {
        Ok(store) => Countdown::restore(&store),
        Err(e) => {
            log::warn!("countdown starts empty: {}", e);
            (Countdown::default(), None)
        }
    }
}

#[component]
pub fn CountdownPanel() -> impl IntoView {
    let (restored, stored_input) = restore();
    let countdown = RwSignal::new(restored);
    let reading = RwSignal::new(Reading::NoTarget);
    let (input, set_input) = signal(stored_input.unwrap_or_default());
    let ticker = Repeating::default();

    refresh(restored, reading, &ticker);

    let on_set = move |_: web_sys::MouseEvent| {
        let store = storage::local_storage()
            .map_err(|e| log::warn!("target date will not persist: {}", e))
            .ok();
        let mut next = countdown.get_untracked();
        match next.submit(&input.get_untracked(), &Local::now(), store.as_ref()) {
            Ok(date) => {
                log::info!("countdown target set to {}", date);
                countdown.set(next);
                refresh(next, reading, &ticker);
            }
            Err(e) => dom::alert(&e.to_string()),
        }
    };

    let field = move |i: usize| move || reading.with(|r| r.fields()[i].clone());
    let day = move |i: usize| move || countdown.with(|c| c.calendar()[i].clone());

    view! {
        <div class="countdown-panel">
            <div class="date-picker-row">
                <input
                    id="event-date-picker"
                    type="date"
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                />
                <button id="set-date-btn" on:click=on_set>"Set Date"</button>
            </div>

            <div id="countdown-timer" class="countdown-timer">
                <div class="time-unit"><span id="days-num">{field(0)}</span><span class="label">"Days"</span></div>
                <div class="time-unit"><span id="hours-num">{field(1)}</span><span class="label">"Hours"</span></div>
                <div class="time-unit"><span id="minutes-num">{field(2)}</span><span class="label">"Minutes"</span></div>
                <div class="time-unit"><span id="seconds-num">{field(3)}</span><span class="label">"Seconds"</span></div>
            </div>

            <div id="calendar-view" class="calendar-view">
                <span id="cal-day-1" class="cal-day">{day(0)}</span>
                <span id="cal-day-2" class="cal-day highlight">{day(1)}</span>
                <span id="cal-day-3" class="cal-day">{day(2)}</span>
            </div>
        </div>
    }
}
