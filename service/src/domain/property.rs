//! [`Property`] definitions.

use std::{collections::HashSet, str::FromStr};

use common::{define_kind, unit, DateTime, DateTimeOf, Price};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Property posted for listing.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Category`] of this [`Property`].
    pub category: Category,

    /// [`Location`] of this [`Property`].
    pub location: Location,

    /// [`Price`] this [`Property`] is posted for.
    pub price: Price,

    /// [`PhotoUrl`] of this [`Property`], if any was uploaded.
    pub photo: Option<PhotoUrl>,

    /// [`DateTime`] when this [`Property`] was posted.
    ///
    /// Immutable: a [`Property`] never changes its creation time, so its
    /// [`AgingTag`] is a pure function of the clock.
    pub created_at: CreationDateTime,
}

impl Property {
    /// Returns the [`AgingTag`] of this [`Property`] as of the provided
    /// `now`.
    #[must_use]
    pub fn aging_tag(&self, now: DateTime) -> AgingTag {
        AgingTag::classify(self.created_at, now)
    }
}

/// ID of a [`Property`].
///
/// Opaque and backend-owned: never minted or interpreted on this side.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct Id(String);

/// Listing category of a [`Property`] (flat, land, commercial, etc).
///
/// Backend-owned free-form value, not interpreted on this side.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Category(String);

impl Category {
    /// Creates a new [`Category`] if the given `category` is valid.
    #[must_use]
    pub fn new(category: impl Into<String>) -> Option<Self> {
        let category = category.into();
        Self::check(&category).then_some(Self(category))
    }

    /// Checks whether the given `category` is a valid [`Category`].
    fn check(category: impl AsRef<str>) -> bool {
        let category = category.as_ref();
        category.trim() == category
            && !category.is_empty()
            && category.len() <= 512
    }
}

impl FromStr for Category {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Category`")
    }
}

/// Location of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Location(String);

impl Location {
    /// Creates a new [`Location`] if the given `location` is valid.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Option<Self> {
        let location = location.into();
        Self::check(&location).then_some(Self(location))
    }

    /// Checks whether the given `location` is a valid [`Location`].
    fn check(location: impl AsRef<str>) -> bool {
        let location = location.as_ref();
        location.trim() == location
            && !location.is_empty()
            && location.len() <= 512
    }
}

impl FromStr for Location {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Location`")
    }
}

/// URL of an uploaded [`Property`] photo.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct PhotoUrl(String);

impl PhotoUrl {
    /// Creates a new [`PhotoUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`PhotoUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        url.trim() == url && !url.is_empty() && url.len() <= 2048
    }
}

impl FromStr for PhotoUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PhotoUrl`")
    }
}

define_kind! {
    #[doc = "Lifecycle tag of a [`Property`], derived purely from its age."]
    enum AgingTag {
        #[doc = "Posted within the last 3 days."]
        Regular = 1,

        #[doc = "Between 4 and 17 days old."]
        Approved = 2,

        #[doc = "Between 18 and 25 days old."]
        Wealth = 3,

        #[doc = "26 days old or older."]
        Listed = 4,
    }
}

impl AgingTag {
    /// Classifies a [`Property`] posted at `created_at` as of the provided
    /// `now`.
    ///
    /// Total: every instant maps to exactly one [`AgingTag`]. A `created_at`
    /// lying in the future of `now` (clock skew between the backend and the
    /// device) yields [`AgingTag::Regular`], as negative elapsed days fall
    /// into the youngest bucket.
    #[must_use]
    pub fn classify(
        created_at: CreationDateTime,
        now: DateTime,
    ) -> Self {
        match created_at.elapsed_days(now) {
            i64::MIN..=3 => Self::Regular,
            4..=17 => Self::Approved,
            18..=25 => Self::Wealth,
            26..=i64::MAX => Self::Listed,
        }
    }
}

/// Set of [`Property`] IDs liked on this device.
///
/// Device-local only, never synced to the backend.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct LikedSet(HashSet<Id>);

impl LikedSet {
    /// Indicates whether the given [`Property`] ID is liked.
    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.0.contains(id)
    }

    /// Likes the given [`Property`] ID.
    ///
    /// Idempotent. Returns whether this [`LikedSet`] was changed.
    pub fn like(&mut self, id: Id) -> bool {
        self.0.insert(id)
    }

    /// Removes the like of the given [`Property`] ID.
    ///
    /// Idempotent. Returns whether this [`LikedSet`] was changed.
    pub fn unlike(&mut self, id: &Id) -> bool {
        self.0.remove(id)
    }

    /// Returns the number of liked [`Property`] IDs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether nothing is liked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// [`DateTime`] when a [`Property`] was posted.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{AgingTag, CreationDateTime, LikedSet};

    const DAY: i64 = 60 * 60 * 24;

    fn created(days_ago: i64, now: DateTime) -> CreationDateTime {
        DateTime::from_unix_timestamp(now.unix_timestamp() - days_ago * DAY)
            .unwrap()
            .coerce()
    }

    fn tag_at_age(days_ago: i64) -> AgingTag {
        let now = DateTime::from_unix_timestamp(100 * DAY).unwrap();
        AgingTag::classify(created(days_ago, now), now)
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(tag_at_age(0), AgingTag::Regular);
        assert_eq!(tag_at_age(3), AgingTag::Regular);
        assert_eq!(tag_at_age(4), AgingTag::Approved);
        assert_eq!(tag_at_age(17), AgingTag::Approved);
        assert_eq!(tag_at_age(18), AgingTag::Wealth);
        assert_eq!(tag_at_age(25), AgingTag::Wealth);
        assert_eq!(tag_at_age(26), AgingTag::Listed);
        assert_eq!(tag_at_age(1000), AgingTag::Listed);
    }

    #[test]
    fn classify_typical_ages() {
        assert_eq!(tag_at_age(5), AgingTag::Approved);
        assert_eq!(tag_at_age(30), AgingTag::Listed);
    }

    #[test]
    fn future_creation_classifies_as_regular() {
        assert_eq!(tag_at_age(-1), AgingTag::Regular);
        assert_eq!(tag_at_age(-365), AgingTag::Regular);
    }

    #[test]
    fn partial_days_floor_into_the_younger_bucket() {
        let now = DateTime::from_unix_timestamp(100 * DAY).unwrap();

        // 3 days and 23 hours old is still day 3.
        let created = DateTime::from_unix_timestamp(
            now.unix_timestamp() - 3 * DAY - 23 * 60 * 60,
        )
        .unwrap()
        .coerce();

        assert_eq!(AgingTag::classify(created, now), AgingTag::Regular);
    }

    #[test]
    fn liking_is_idempotent() {
        let mut liked = LikedSet::default();

        assert!(liked.like("p1".into()));
        assert!(!liked.like("p1".into()));
        assert_eq!(liked.len(), 1);
        assert!(liked.contains(&"p1".into()));

        assert!(liked.unlike(&"p1".into()));
        assert!(!liked.unlike(&"p1".into()));
        assert!(liked.is_empty());
    }
}
