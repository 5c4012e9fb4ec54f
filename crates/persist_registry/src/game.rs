//! Built-in preference schemas for the game
//!
//! `schema()` is the full Player/Currency/Setting layout. `simple_schema()`
//! and `profile_schema()` are the older flat layouts (Name/Coin/Gem, and the
//! split-name profile) kept for save files written before categories
//! existed. All of them use the same store keys for the fields they share.

use crate::Schema;
use once_cell::sync::Lazy;

static GAME_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    crate::define_prefs! {
        Player {
            FullName: String => "_flname",
            FirstName: String => "_fname",
            LastName: String => "_lname",
            DateOfBirth: String => "_dob",
            Gender: String => "_gender",
        }
        Currency {
            Coin: String => "_coin",
            Gem: String => "_gem",
        }
        Setting {
            Music: Bool => "_music",
            Sound: Bool => "_sound",
            Vibration: Bool => "_vibration",
        }
    }
    .expect("built-in game schema is valid")
});

static SIMPLE_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    crate::define_prefs! {
        Profile {
            Name: String => "_name",
            Coin: String => "_coin",
            Gem: String => "_gem",
        }
    }
    .expect("built-in simple schema is valid")
});

static PROFILE_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    crate::define_prefs! {
        Profile {
            FullName: String => "_flname",
            FirstName: String => "_fname",
            LastName: String => "_lname",
            DateOfBirth: String => "_dob",
            Coin: String => "_coin",
            Gem: String => "_gem",
        }
    }
    .expect("built-in profile schema is valid")
});

/// Player/Currency/Setting schema.
pub fn schema() -> &'static Schema {
    &GAME_SCHEMA
}

/// Flat Name/Coin/Gem schema.
pub fn simple_schema() -> &'static Schema {
    &SIMPLE_SCHEMA
}

/// Flat profile schema: split names, date of birth and currencies.
pub fn profile_schema() -> &'static Schema {
    &PROFILE_SCHEMA
}
