//! [`Property`] read model definitions.
//!
//! [`Property`]: crate::domain::Property

use common::DateTime;

use crate::domain::{
    property::{AgingTag, LikedSet},
    Property,
};

/// [`Property`] decorated for rendering.
#[derive(Clone, Debug)]
pub struct TaggedProperty {
    /// The [`Property`] itself.
    pub property: Property,

    /// [`AgingTag`] of the [`Property`] as of the [`Listing`] time.
    pub tag: AgingTag,

    /// Whether the [`Property`] is liked on this device.
    pub liked: bool,
}

/// Listing of [`TaggedProperty`]s.
///
/// All tags are computed against the single `taken_at` instant, so one
/// listing is always internally consistent even though a [`Property`] may
/// change its [`AgingTag`] between listings as it ages.
#[derive(Clone, Debug)]
pub struct Listing {
    /// [`DateTime`] the tags of this [`Listing`] were computed against.
    pub taken_at: DateTime,

    /// [`TaggedProperty`]s of this [`Listing`], in backend order.
    pub items: Vec<TaggedProperty>,
}

impl Listing {
    /// Composes a new [`Listing`] of the provided [`Property`]s as of the
    /// provided `now`.
    #[must_use]
    pub fn compose(
        properties: Vec<Property>,
        now: DateTime,
        liked: &LikedSet,
    ) -> Self {
        let items = properties
            .into_iter()
            .map(|property| TaggedProperty {
                tag: property.aging_tag(now),
                liked: liked.contains(&property.id),
                property,
            })
            .collect();
        Self {
            taken_at: now,
            items,
        }
    }
}
