//! Latest-wins storage for the three pool series.
//!
//! Fetches for a series can complete out of order. Every fetch takes a
//! [`RequestId`] when it starts; when it lands, its data replaces the stored
//! series only if no newer request for the same series has already landed.

use lprange_core::{FeeRecord, LiquidityTick, PricePoint};

/// Identity of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Prices,
    Fees,
    Ticks,
}

impl SeriesKind {
    /// Get the display name for this series.
    pub fn name(&self) -> &'static str {
        match self {
            SeriesKind::Prices => "prices",
            SeriesKind::Fees => "fees",
            SeriesKind::Ticks => "ticks",
        }
    }

    /// Get all series kinds.
    pub fn all() -> &'static [SeriesKind] {
        &[SeriesKind::Prices, SeriesKind::Fees, SeriesKind::Ticks]
    }
}

/// Ticket issued when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId {
    pub kind: SeriesKind,
    seq: u64,
}

#[derive(Debug)]
struct Slot<T> {
    data: Option<Vec<T>>,
    issued: u64,
    landed: Option<u64>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            data: None,
            issued: 0,
            landed: None,
        }
    }
}

impl<T> Slot<T> {
    fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn is_current(&self, seq: u64) -> bool {
        self.landed.map_or(true, |landed| seq > landed)
    }

    fn land(&mut self, seq: u64, data: Vec<T>) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.landed = Some(seq);
        self.data = Some(data);
        true
    }

    fn settle(&mut self, seq: u64) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.landed = Some(seq);
        true
    }
}

/// Latest landed copy of each series.
#[derive(Debug, Default)]
pub struct SeriesStore {
    prices: Slot<PricePoint>,
    fees: Slot<FeeRecord>,
    ticks: Slot<LiquidityTick>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for `kind`.
    pub fn begin(&mut self, kind: SeriesKind) -> RequestId {
        let seq = match kind {
            SeriesKind::Prices => self.prices.begin(),
            SeriesKind::Fees => self.fees.begin(),
            SeriesKind::Ticks => self.ticks.begin(),
        };
        RequestId { kind, seq }
    }

    /// Check whether a landing for `id` would still be accepted.
    pub fn is_current(&self, id: RequestId) -> bool {
        match id.kind {
            SeriesKind::Prices => self.prices.is_current(id.seq),
            SeriesKind::Fees => self.fees.is_current(id.seq),
            SeriesKind::Ticks => self.ticks.is_current(id.seq),
        }
    }

    fn check_kind(id: RequestId, expected: SeriesKind) -> bool {
        if id.kind != expected {
            log::warn!("Request for {} landed as {}", id.kind.name(), expected.name());
            return false;
        }
        true
    }

    fn report(id: RequestId, accepted: bool) -> bool {
        if !accepted {
            log::debug!("Ignoring stale {} result (request {})", id.kind.name(), id.seq);
        }
        accepted
    }

    /// Store a price series. Returns `false` if the result was stale.
    pub fn land_prices(&mut self, id: RequestId, data: Vec<PricePoint>) -> bool {
        Self::check_kind(id, SeriesKind::Prices) && Self::report(id, self.prices.land(id.seq, data))
    }

    /// Store a fee series. Returns `false` if the result was stale.
    pub fn land_fees(&mut self, id: RequestId, data: Vec<FeeRecord>) -> bool {
        Self::check_kind(id, SeriesKind::Fees) && Self::report(id, self.fees.land(id.seq, data))
    }

    /// Store a tick snapshot. Returns `false` if the result was stale.
    pub fn land_ticks(&mut self, id: RequestId, data: Vec<LiquidityTick>) -> bool {
        Self::check_kind(id, SeriesKind::Ticks) && Self::report(id, self.ticks.land(id.seq, data))
    }

    /// Record a failed fetch. Previously landed data is kept.
    ///
    /// Returns `false` if a newer request already landed, in which case the
    /// failure is irrelevant and should not be surfaced.
    pub fn land_failure(&mut self, id: RequestId) -> bool {
        let accepted = match id.kind {
            SeriesKind::Prices => self.prices.settle(id.seq),
            SeriesKind::Fees => self.fees.settle(id.seq),
            SeriesKind::Ticks => self.ticks.settle(id.seq),
        };
        Self::report(id, accepted)
    }

    pub fn prices(&self) -> Option<&[PricePoint]> {
        self.prices.data.as_deref()
    }

    pub fn fees(&self) -> Option<&[FeeRecord]> {
        self.fees.data.as_deref()
    }

    pub fn ticks(&self) -> Option<&[LiquidityTick]> {
        self.ticks.data.as_deref()
    }

    /// Most recent price point, if prices have landed and are non-empty.
    pub fn latest_price(&self) -> Option<PricePoint> {
        self.prices().and_then(|p| p.last().copied())
    }

    /// Check if a series has landed at least once.
    pub fn has(&self, kind: SeriesKind) -> bool {
        match kind {
            SeriesKind::Prices => self.prices.data.is_some(),
            SeriesKind::Fees => self.fees.data.is_some(),
            SeriesKind::Ticks => self.ticks.data.is_some(),
        }
    }
}
