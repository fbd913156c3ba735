//! Work timer state machine, persisted as the timerState settings document
//! after every transition. All transitions take `now` explicitly so they can
//! be driven by a simulated clock.

use crate::core::categories::CategoryLogic;
use crate::core::events::{DomainEvent, EventBus};
use crate::core::rates;
use crate::errors::{AppError, AppResult};
use crate::models::person::Person;
use crate::models::settings::{CategoryKind, TimerData};
use crate::models::work_log::WorkLog;
use crate::store::engine::StorageEngine;
use crate::utils::{date, ids, time};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone)]
pub struct TimerStatus {
    pub phase: TimerPhase,
    pub elapsed_ms: i64,
    pub data: TimerData,
}

pub struct TimerLogic;

impl TimerLogic {
    fn phase_of(data: &TimerData) -> TimerPhase {
        if data.start_time.is_none() {
            TimerPhase::Idle
        } else if data.is_running {
            TimerPhase::Running
        } else {
            TimerPhase::Paused
        }
    }

    /// Start a new timer or resume a paused one. Starting while already
    /// running changes nothing.
    pub fn start(
        engine: &mut StorageEngine,
        bus: &EventBus,
        person: Person,
        activity: Option<&str>,
        now: DateTime<Local>,
    ) -> AppResult<TimerData> {
        let mut state = engine.timer_state()?;
        let now_ms = now.timestamp_millis();

        match Self::phase_of(&state.data) {
            TimerPhase::Running => return Ok(state.data),
            TimerPhase::Paused => {
                // shift the start forward by the pause length so elapsed
                // time excludes the pause
                let start = state.data.start_time.unwrap_or(now_ms);
                let pause = state.data.pause_time.unwrap_or(now_ms);
                state.data.start_time = Some(start + (now_ms - pause));
                state.data.pause_time = None;
                state.data.is_running = true;
            }
            TimerPhase::Idle => {
                let activity = activity.unwrap_or("").trim().to_string();
                if activity.is_empty() {
                    return Err(AppError::Validation(
                        "an activity is required to start the timer".to_string(),
                    ));
                }

                CategoryLogic::register(engine, bus, CategoryKind::Task, &activity)?;

                state.data.start_time = Some(now_ms);
                state.data.pause_time = None;
                state.data.is_running = true;
                state.data.person = Some(person);
                state.data.activity = activity;
            }
        }

        engine.put_timer_state(&state)?;
        engine.oplog(
            "timer_start",
            state.data.person.map(|p| p.code()).unwrap_or(""),
            &format!("Timer running for activity '{}'", state.data.activity),
        )?;
        bus.publish(&DomainEvent::TimerStarted {
            person: state.data.person.unwrap_or(person),
        });
        Ok(state.data)
    }

    /// Freeze the running timer. Outside Running this is a no-op.
    pub fn pause(
        engine: &mut StorageEngine,
        bus: &EventBus,
        now: DateTime<Local>,
    ) -> AppResult<TimerData> {
        let mut state = engine.timer_state()?;
        if Self::phase_of(&state.data) != TimerPhase::Running {
            return Ok(state.data);
        }

        state.data.pause_time = Some(now.timestamp_millis());
        state.data.is_running = false;
        engine.put_timer_state(&state)?;
        engine.oplog("timer_pause", "", "Timer paused")?;
        bus.publish(&DomainEvent::TimerPaused);
        Ok(state.data)
    }

    /// Stop the timer and record the session as a WorkLog. Returns None when
    /// no timer was started.
    pub fn stop(
        engine: &mut StorageEngine,
        bus: &EventBus,
        note: &str,
        now: DateTime<Local>,
    ) -> AppResult<Option<WorkLog>> {
        let mut state = engine.timer_state()?;
        let Some(start_ms) = state.data.start_time else {
            return Ok(None);
        };
        let person = state.data.person.ok_or_else(|| {
            AppError::Validation("timer state has no person recorded".to_string())
        })?;

        let now_ms = now.timestamp_millis();
        let elapsed = rates::elapsed_ms(
            state.data.start_time,
            state.data.pause_time,
            state.data.is_running,
            now_ms,
        );
        let worked = rates::ms_to_minutes(elapsed);
        let earnings = rates::earnings_for(worked, person);

        let log = WorkLog {
            id: ids::new_id(),
            person,
            date: date::date_of(now),
            start: time::local_hhmm(start_ms).ok_or_else(|| {
                AppError::Validation("timer start time is out of range".to_string())
            })?,
            end: time::hhmm_of(now),
            break_min: 0,
            worked,
            earnings,
            deduction: rates::deduction_for(earnings, person),
            activity: state.data.activity.clone(),
            note: note.to_string(),
        };

        engine.add(&log)?;
        bus.publish(&DomainEvent::WorkLogAdded { id: log.id.clone() });

        state.data = TimerData::default();
        engine.put_timer_state(&state)?;

        engine.oplog(
            "timer_stop",
            person.code(),
            &format!("Recorded {} worked minutes for '{}'", worked, log.activity),
        )?;
        bus.publish(&DomainEvent::TimerStopped {
            worked_minutes: worked,
        });
        Ok(Some(log))
    }

    pub fn status(engine: &StorageEngine, now: DateTime<Local>) -> AppResult<TimerStatus> {
        let state = engine.timer_state()?;
        let elapsed = rates::elapsed_ms(
            state.data.start_time,
            state.data.pause_time,
            state.data.is_running,
            now.timestamp_millis(),
        );
        Ok(TimerStatus {
            phase: Self::phase_of(&state.data),
            elapsed_ms: elapsed,
            data: state.data,
        })
    }
}
