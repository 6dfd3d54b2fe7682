//! Exchange trading sessions.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

/// Source of market close times.
pub trait TradingCalendar: Send + Sync {
    /// Returns the close of `exchange` on `date`, or `None` if the exchange
    /// does not trade that day or is unknown.
    fn market_close(&self, exchange: &str, date: NaiveDate) -> Option<DateTime<Utc>>;
}

/// Regular trading session of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// Exchange time zone.
    pub timezone: Tz,
    /// Local closing time.
    pub close: NaiveTime,
}

impl Session {
    /// Creates a session closing at `hour:minute` local time.
    #[must_use]
    pub fn closing_at(timezone: Tz, hour: u32, minute: u32) -> Self {
        Self {
            timezone,
            close: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Monday-to-Friday sessions per exchange code. Holidays are not modelled.
#[derive(Debug, Clone)]
pub struct SessionCalendar {
    sessions: HashMap<String, Session>,
}

impl Default for SessionCalendar {
    fn default() -> Self {
        use chrono_tz::{America, Asia, Europe};

        Self::empty()
            .with_session("NASDAQ", Session::closing_at(America::New_York, 16, 0))
            .with_session("NYSE", Session::closing_at(America::New_York, 16, 0))
            .with_session("AMEX", Session::closing_at(America::New_York, 16, 0))
            .with_session("XETRA", Session::closing_at(Europe::Berlin, 17, 30))
            .with_session("EUREX", Session::closing_at(Europe::Berlin, 22, 0))
            .with_session("LSE", Session::closing_at(Europe::London, 16, 30))
            .with_session("UK", Session::closing_at(Europe::London, 16, 30))
            .with_session("TSX", Session::closing_at(America::Toronto, 16, 0))
            .with_session("JPX", Session::closing_at(Asia::Tokyo, 15, 0))
    }
}

impl SessionCalendar {
    /// Creates a calendar without sessions.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Adds or replaces the session of an exchange.
    #[must_use]
    pub fn with_session(mut self, exchange: &str, session: Session) -> Self {
        self.sessions.insert(exchange.to_uppercase(), session);
        self
    }

    /// Returns the session of an exchange.
    #[must_use]
    pub fn session(&self, exchange: &str) -> Option<&Session> {
        self.sessions.get(&exchange.to_uppercase())
    }
}

impl TradingCalendar for SessionCalendar {
    fn market_close(&self, exchange: &str, date: NaiveDate) -> Option<DateTime<Utc>> {
        let session = self.session(exchange)?;
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return None;
        }
        session
            .timezone
            .from_local_datetime(&date.and_time(session.close))
            .earliest()
            .map(|close| close.with_timezone(&Utc))
    }
}
