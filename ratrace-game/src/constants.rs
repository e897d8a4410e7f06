//! Centralized balance and tuning constants for the Rat Race engine.
//!
//! These values define the deterministic money math for the core loop.
//! Keeping them together means a rule change is a reviewed code change
//! rather than an edit to a JSON asset.

// Household -----------------------------------------------------------------
/// Monthly expense added for each child.
pub const CHILD_EXPENSE: i64 = 40;
/// Maximum number of children a player may have.
pub const MAX_CHILDREN: u8 = 3;

// Turn flow -----------------------------------------------------------------
/// Turns skipped after landing on Downsize.
pub const DOWNSIZE_SKIPS: u8 = 2;
/// Donation as a percentage of monthly income.
pub const CHARITY_RATE_PCT: i64 = 10;
pub(crate) const DIE_FACES: u8 = 6;
pub(crate) const RAT_RACE_DICE: usize = 1;
pub(crate) const FAST_TRACK_DICE: usize = 2;
pub(crate) const CHARITY_DICE: usize = 3;

// Custom mode ---------------------------------------------------------------
pub(crate) const CUSTOM_STARTING_CASH_PCT: i64 = 150;
pub(crate) const CUSTOM_BASE_EXPENSES_PCT: i64 = 80;
pub(crate) const CUSTOM_PASSIVE_INCOME_PCT: i64 = 120;

// Fast Track ----------------------------------------------------------------
pub(crate) const FAST_TRACK_BUYOUT_MULTIPLIER: i64 = 100;
pub(crate) const FAST_TRACK_INCOME_GOAL_BONUS: i64 = 50_000;

// Session -------------------------------------------------------------------
/// Maximum number of players at one table.
pub const MAX_PLAYERS: usize = 6;
/// Number of entries retained in the display log.
pub const TURN_LOG_CAPACITY: usize = 50;
