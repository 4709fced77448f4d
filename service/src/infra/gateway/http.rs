//! HTTP [`Gateway`] implementation.

use common::operations::{By, Select, Update};
use derive_more::{Display, Error as StdError};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de::DeserializeOwned, Deserialize};
use tracerr::Traced;

use crate::{
    domain::{
        lead::{self, CallStatus},
        property, referral, Lead, Property,
    },
    infra::{gateway, Gateway},
};

/// Value the backend uses to flag a performed call on a lead.
const CALL_DONE_FLAG: &str = "Done";

/// [`Http`] gateway configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the backend.
    pub endpoint: String,

    /// Opaque auth token attached to every request.
    pub auth_token: SecretString,
}

/// HTTP [`Gateway`] to the backend REST API.
///
/// The backend is an opaque collaborator: this client only calls named
/// endpoints with an auth token and decodes the JSON it gets back. Non-2xx
/// responses and undecodable payloads surface as typed errors, never
/// panics.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// [`Config`] of this gateway.
    config: Config,
}

impl Http {
    /// Creates a new [`Http`] gateway with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client fails to initialize.
    pub fn new(config: Config) -> Result<Self, Traced<gateway::Error>> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(Error::Client)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;
        Ok(Self { client, config })
    }

    /// Returns the full URL of the provided `path`.
    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.endpoint.trim_end_matches('/'))
    }

    /// Performs a `GET` request decoding the JSON response body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, Traced<gateway::Error>> {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(self.config.auth_token.expose_secret())
            .send()
            .await
            .map_err(Error::Request)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(tracerr::new!(gateway::Error::from(Error::Status(
                status,
            ))));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(Error::Request)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;
        serde_json::from_slice(&bytes)
            .map_err(Error::Json)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))
    }

    /// Performs a `POST` request with the provided JSON `body`, expecting no
    /// meaningful response body.
    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(), Traced<gateway::Error>> {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(self.config.auth_token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(Error::Request)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(tracerr::new!(gateway::Error::from(Error::Status(
                status,
            ))));
        }
        Ok(())
    }
}

impl Gateway<Select<By<Vec<Lead>, lead::Kind>>> for Http {
    type Ok = Vec<Lead>;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Lead>, lead::Kind>>,
    ) -> Result<Self::Ok, Self::Err> {
        let kind = by.into_inner();
        let envelope: Envelope<WireLead> = self
            .get_json(&format!("leads/{}", path_segment(kind)))
            .await?;
        envelope
            .into_items()
            .into_iter()
            .map(|wire| {
                Lead::try_from(wire)
                    .map_err(tracerr::from_and_wrap!(=> gateway::Error))
            })
            .collect()
    }
}

impl Gateway<Select<By<Vec<Property>, ()>>> for Http {
    type Ok = Vec<Property>;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Property>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let envelope: Envelope<WireProperty> =
            self.get_json("properties").await?;
        envelope
            .into_items()
            .into_iter()
            .map(|wire| {
                Property::try_from(wire)
                    .map_err(tracerr::from_and_wrap!(=> gateway::Error))
            })
            .collect()
    }
}

impl Gateway<Update<(lead::Id, CallStatus)>> for Http {
    type Ok = ();
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Update((id, status)): Update<(lead::Id, CallStatus)>,
    ) -> Result<Self::Ok, Self::Err> {
        let flag = match status {
            CallStatus::Done => CALL_DONE_FLAG,
            CallStatus::Pending => "Pending",
        };
        self.post_json(
            &format!("leads/{id}/call"),
            &serde_json::json!({ "callExecutiveCall": flag }),
        )
        .await
    }
}

/// Returns the URL path segment of the provided [`lead::Kind`].
fn path_segment(kind: lead::Kind) -> &'static str {
    match kind {
        lead::Kind::Agent => "agents",
        lead::Kind::Customer => "customers",
        lead::Kind::CoreMember => "core-members",
        lead::Kind::Expert => "experts",
    }
}

/// Shape-tolerant JSON response body.
///
/// The backend answers some endpoints with a `{"data": [...]}` envelope and
/// others with a bare array; both decode the same way.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    /// `{"data": [...]}`-shaped body.
    Wrapped {
        /// Items of the envelope.
        data: Vec<T>,
    },

    /// Bare-array body.
    Bare(Vec<T>),
}

impl<T> Envelope<T> {
    /// Consumes this [`Envelope`] and returns its items.
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(items) => items,
        }
    }
}

/// Backend representation of a [`Lead`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLead {
    /// ID of the lead.
    id: String,

    /// Full name of the lead, possibly blank.
    #[serde(default)]
    full_name: Option<String>,

    /// Mobile number of the lead.
    mobile_number: String,

    /// Referral code assigned to the lead.
    referral_code: String,

    /// Referral code of the referrer, possibly blank or absent.
    #[serde(default)]
    referred_by_code: Option<String>,

    /// Call flag of the lead, `"Done"` once the call was performed.
    #[serde(default)]
    call_executive_call: Option<String>,

    /// Registration time of the lead.
    #[serde(with = "common::datetime::serde::rfc3339")]
    created_at: lead::CreationDateTime,
}

impl TryFrom<WireLead> for Lead {
    type Error = Error;

    fn try_from(wire: WireLead) -> Result<Self, Self::Error> {
        let WireLead {
            id,
            full_name,
            mobile_number,
            referral_code,
            referred_by_code,
            call_executive_call,
            created_at,
        } = wire;

        Ok(Self {
            id: id.into(),
            // A blank name renders via the generic pool label downstream.
            full_name: full_name.and_then(lead::FullName::new),
            mobile_number: lead::MobileNumber::new(mobile_number)
                .ok_or(Error::Malformed("mobileNumber"))?,
            referral_code: referral_code.into(),
            referred_by: referred_by_code
                .map(referral::Code::from)
                .filter(|code| !code.is_blank()),
            call_status: if call_executive_call.as_deref()
                == Some(CALL_DONE_FLAG)
            {
                CallStatus::Done
            } else {
                CallStatus::Pending
            },
            created_at,
        })
    }
}

/// Backend representation of a [`Property`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireProperty {
    /// ID of the property.
    id: String,

    /// Listing category of the property.
    property_type: String,

    /// Location of the property.
    location: String,

    /// Price of the property, as a numeric string.
    price: common::Price,

    /// Photo URL of the property, possibly blank or absent.
    #[serde(default)]
    photo: Option<String>,

    /// Posting time of the property.
    #[serde(with = "common::datetime::serde::rfc3339")]
    created_at: property::CreationDateTime,
}

impl TryFrom<WireProperty> for Property {
    type Error = Error;

    fn try_from(wire: WireProperty) -> Result<Self, Self::Error> {
        let WireProperty {
            id,
            property_type,
            location,
            price,
            photo,
            created_at,
        } = wire;

        Ok(Self {
            id: id.into(),
            category: property::Category::new(property_type)
                .ok_or(Error::Malformed("propertyType"))?,
            location: property::Location::new(location)
                .ok_or(Error::Malformed("location"))?,
            price,
            photo: photo.and_then(property::PhotoUrl::new),
            created_at,
        })
    }
}

/// [`Http`] gateway error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Underlying HTTP client failed to initialize.
    #[display("failed to initialize HTTP client: {_0}")]
    Client(reqwest::Error),

    /// Request failed to reach the backend.
    #[display("request failed: {_0}")]
    Request(reqwest::Error),

    /// Backend responded with a non-2xx status.
    #[display("backend responded with `{_0}` status")]
    Status(#[error(not(source))] reqwest::StatusCode),

    /// Response body failed to decode.
    #[display("failed to decode response body: {_0}")]
    Json(serde_json::Error),

    /// Decoded payload carries a malformed field.
    #[display("malformed `{_0}` field in backend payload")]
    Malformed(#[error(not(source))] &'static str),
}

#[cfg(test)]
mod spec {
    use super::{Envelope, WireLead, WireProperty};
    use crate::domain::{lead::CallStatus, property::AgingTag, Lead, Property};

    #[test]
    fn decodes_both_envelope_shapes() {
        let wrapped: Envelope<u32> =
            serde_json::from_str(r#"{"data": [1, 2, 3]}"#).unwrap();
        let bare: Envelope<u32> = serde_json::from_str("[1, 2, 3]").unwrap();

        assert_eq!(wrapped.into_items(), [1, 2, 3]);
        assert_eq!(bare.into_items(), [1, 2, 3]);
    }

    #[test]
    fn decodes_a_lead() {
        let json = r#"{
            "id": "64f1",
            "fullName": "Asha",
            "mobileNumber": "9876543210",
            "referralCode": "WA0000000007",
            "referredByCode": "WA0000000001",
            "callExecutiveCall": "Done",
            "createdAt": "2024-05-01T12:30:00Z"
        }"#;

        let wire: WireLead = serde_json::from_str(json).unwrap();
        let lead = Lead::try_from(wire).unwrap();

        assert_eq!(lead.id.to_string(), "64f1");
        assert_eq!(lead.full_name.unwrap().to_string(), "Asha");
        assert_eq!(lead.call_status, CallStatus::Done);
        assert_eq!(lead.referred_by.unwrap().to_string(), "WA0000000001");
    }

    #[test]
    fn absent_call_flag_decodes_as_pending() {
        let json = r#"{
            "id": "64f2",
            "mobileNumber": "9876543210",
            "referralCode": "WA0000000008",
            "createdAt": "2024-05-01T12:30:00Z"
        }"#;

        let wire: WireLead = serde_json::from_str(json).unwrap();
        let lead = Lead::try_from(wire).unwrap();

        assert_eq!(lead.call_status, CallStatus::Pending);
        assert!(lead.full_name.is_none());
        assert!(lead.referred_by.is_none());
    }

    #[test]
    fn decodes_a_property() {
        let json = r#"{
            "id": "p1",
            "propertyType": "Flat",
            "location": "Vijayawada",
            "price": "4500000",
            "photo": "https://cdn.example.com/p1.jpg",
            "createdAt": "2024-05-01T12:30:00Z"
        }"#;

        let wire: WireProperty = serde_json::from_str(json).unwrap();
        let property = Property::try_from(wire).unwrap();

        assert_eq!(property.category.to_string(), "Flat");
        assert_eq!(property.price.to_string(), "4500000");
        assert_eq!(
            property.aging_tag(property.created_at.coerce()),
            AgingTag::Regular,
        );
    }
}
