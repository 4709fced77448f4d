//! Plain text rendering of read models.

use std::fmt::Write as _;

use service::{
    domain::{lead, referral},
    read,
    task::poll_leads::Snapshot,
};

/// Renders the provided [`read::lead::Worklist`], resolving each lead's
/// referrer against the provided [`referral::Directory`].
#[must_use]
pub fn worklist(
    kind: lead::Kind,
    worklist: &read::lead::Worklist,
    referrers: &referral::Directory,
) -> String {
    let mut out = String::new();
    _ = writeln!(out, "{kind}: {} leads", worklist.len());

    for (title, leads) in [
        ("PENDING", &worklist.pending),
        ("CONTACTED", &worklist.contacted),
    ] {
        _ = writeln!(out, "\n{title} ({})", leads.len());
        for l in leads {
            let name = l
                .full_name
                .as_ref()
                .map_or(kind.generic_label(), AsRef::as_ref);
            let referrer = referrers.lookup(l.referred_by.as_ref());
            _ = writeln!(
                out,
                "{} | {name} | {} | {} | referred by: {referrer}",
                l.id, l.mobile_number, l.call_status,
            );
        }
    }
    out
}

/// Renders the provided [`read::property::Listing`].
///
/// Liked properties are marked with a leading `*`.
#[must_use]
pub fn listing(listing: &read::property::Listing) -> String {
    let mut out = String::new();
    _ = writeln!(
        out,
        "PROPERTIES ({}) as of {}",
        listing.items.len(),
        listing.taken_at.to_rfc3339(),
    );

    for item in &listing.items {
        let liked = if item.liked { "*" } else { " " };
        let p = &item.property;
        _ = writeln!(
            out,
            "{liked} {} | {} | {} | {} | {}",
            p.id, item.tag, p.category, p.location, p.price,
        );
    }
    out
}

/// Renders a one-screen summary of the provided [`Snapshot`].
#[must_use]
pub fn snapshot(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    _ = writeln!(
        out,
        "snapshot #{} at {}",
        snapshot.seq,
        snapshot.taken_at.to_rfc3339(),
    );

    let mut kinds: Vec<_> = snapshot.worklists.keys().copied().collect();
    kinds.sort_unstable_by_key(|k| k.u8());
    for kind in kinds {
        if let Some(w) = snapshot.worklists.get(&kind) {
            _ = writeln!(
                out,
                "  {kind}: {} pending / {} contacted",
                w.pending.len(),
                w.contacted.len(),
            );
        }
    }
    out
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use service::{
        domain::{
            lead::{CallStatus, FullName, Kind, MobileNumber},
            property::{self, Category, LikedSet, Location},
            referral::{Code, Directory, Pools},
            ContactedSet, Lead, Property,
        },
        read,
    };

    use super::{listing, worklist};

    fn lead(id: &str, name: Option<&str>, referred_by: Option<&str>) -> Lead {
        Lead {
            id: id.into(),
            full_name: name.and_then(FullName::new),
            mobile_number: MobileNumber::new("9876543210").unwrap(),
            referral_code: Code::from(id),
            referred_by: referred_by.map(Code::from),
            call_status: CallStatus::Pending,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        }
    }

    #[test]
    fn worklist_renders_resolved_referrers() {
        let referrer = [lead("WA1", Some("Asha"), None)];
        let directory = Directory::new(&Pools {
            customers: &referrer,
            ..Pools::default()
        });

        let leads = vec![
            lead("WA2", Some("Bala"), Some("WA1")),
            lead("WA3", None, Some("WA9")),
        ];
        let rendered = worklist(
            Kind::Agent,
            &read::lead::Worklist::partition(leads, &ContactedSet::default()),
            &directory,
        );

        assert!(rendered.contains("PENDING (2)"), "got: {rendered}");
        assert!(rendered.contains("CONTACTED (0)"), "got: {rendered}");
        assert!(rendered.contains("referred by: Asha"), "got: {rendered}");
        assert!(
            rendered.contains("referred by: Referrer not found"),
            "got: {rendered}",
        );
        // Blank name falls back to the generic label of the worklist's kind.
        assert!(rendered.contains("WA3 | Agent"), "got: {rendered}");
    }

    #[test]
    fn listing_marks_liked_properties() {
        let property = |id: &str| Property {
            id: property::Id::from(id),
            category: Category::new("Flat").unwrap(),
            location: Location::new("Chennai").unwrap(),
            price: "1500000".parse().unwrap(),
            photo: None,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        };

        let mut liked = LikedSet::default();
        _ = liked.like(property::Id::from("P2"));

        let rendered = listing(&read::property::Listing::compose(
            vec![property("P1"), property("P2")],
            DateTime::UNIX_EPOCH,
            &liked,
        ));

        assert!(rendered.contains("\n  P1 |"), "got: {rendered}");
        assert!(rendered.contains("\n* P2 |"), "got: {rendered}");
        assert!(rendered.contains("| REGULAR |"), "got: {rendered}");
    }
}
