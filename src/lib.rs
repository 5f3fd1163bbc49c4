pub mod activity;
pub mod calculator;
pub mod config;
pub mod factors;
pub mod ledger;
pub mod offset;
pub mod output;
