use serde::{Deserialize, Serialize};

use super::nullable::{Nullable, non_null};

/// Column widths of `t_client`
pub mod limits {
    pub const NOM: usize = 40;
    pub const PRENOM: usize = 30;
    pub const GENRE: usize = 8;
    pub const ADRESSE: usize = 50;
    pub const COMPLEMENT_ADRESSE: usize = 50;
    pub const TEL: usize = 10;
    pub const EMAIL: usize = 255;
}

/// A row of `t_client`
#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub codcli: i64,
    pub nom: String,
    pub prenom: String,
    pub genre: Option<String>,
    pub adresse: String,
    pub complement_adresse: Option<String>,
    pub tel: Option<String>,
    pub email: Option<String>,
    pub newsletter: Option<i64>,
}

fn default_newsletter() -> Option<i64> {
    Some(0)
}

/// Payload for creating a client. `codcli` is never accepted from callers.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub nom: String,
    pub prenom: String,
    #[serde(default)]
    pub genre: Option<String>,
    pub adresse: String,
    #[serde(default)]
    pub complement_adresse: Option<String>,
    #[serde(default)]
    pub tel: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_newsletter")]
    pub newsletter: Option<i64>,
}

impl NewClient {
    /// A payload with only the required fields set
    pub fn new(nom: impl Into<String>, prenom: impl Into<String>, adresse: impl Into<String>) -> Self {
        Self {
            nom: nom.into(),
            prenom: prenom.into(),
            genre: None,
            adresse: adresse.into(),
            complement_adresse: None,
            tel: None,
            email: None,
            newsletter: default_newsletter(),
        }
    }
}

/// Payload for a partial update.
///
/// Required columns can be omitted but not nulled; nullable columns track
/// whether the key was present at all.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    #[serde(default, deserialize_with = "non_null")]
    pub nom: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub prenom: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub adresse: Option<String>,
    #[serde(default)]
    pub complement_adresse: Nullable<String>,
    #[serde(default)]
    pub genre: Nullable<String>,
    #[serde(default)]
    pub tel: Nullable<String>,
    #[serde(default)]
    pub email: Nullable<String>,
    #[serde(default)]
    pub newsletter: Nullable<i64>,
}

/// A single column assignment produced from a patch payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientChange {
    Nom(String),
    Prenom(String),
    Genre(Option<String>),
    Adresse(String),
    ComplementAdresse(Option<String>),
    Tel(Option<String>),
    Email(Option<String>),
    Newsletter(Option<i64>),
}

impl ClientPatch {
    /// The keys present in the payload, in column order
    pub fn into_changes(self) -> Vec<ClientChange> {
        let mut changes = Vec::new();

        if let Some(nom) = self.nom {
            changes.push(ClientChange::Nom(nom));
        }
        if let Some(prenom) = self.prenom {
            changes.push(ClientChange::Prenom(prenom));
        }
        if let Some(genre) = self.genre.into_change() {
            changes.push(ClientChange::Genre(genre));
        }
        if let Some(adresse) = self.adresse {
            changes.push(ClientChange::Adresse(adresse));
        }
        if let Some(complement) = self.complement_adresse.into_change() {
            changes.push(ClientChange::ComplementAdresse(complement));
        }
        if let Some(tel) = self.tel.into_change() {
            changes.push(ClientChange::Tel(tel));
        }
        if let Some(email) = self.email.into_change() {
            changes.push(ClientChange::Email(email));
        }
        if let Some(newsletter) = self.newsletter.into_change() {
            changes.push(ClientChange::Newsletter(newsletter));
        }

        changes
    }
}

impl Client {
    /// Merge one change onto the row
    pub fn apply(&mut self, change: ClientChange) {
        match change {
            ClientChange::Nom(v) => self.nom = v,
            ClientChange::Prenom(v) => self.prenom = v,
            ClientChange::Genre(v) => self.genre = v,
            ClientChange::Adresse(v) => self.adresse = v,
            ClientChange::ComplementAdresse(v) => self.complement_adresse = v,
            ClientChange::Tel(v) => self.tel = v,
            ClientChange::Email(v) => self.email = v,
            ClientChange::Newsletter(v) => self.newsletter = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Client {
        Client {
            codcli: 7,
            nom: "Martin".into(),
            prenom: "Paul".into(),
            genre: Some("M".into()),
            adresse: "456 Rue Exemple".into(),
            complement_adresse: None,
            tel: Some("0102030405".into()),
            email: None,
            newsletter: Some(0),
        }
    }

    #[test]
    fn create_payload_defaults_optional_fields() {
        let payload: NewClient = serde_json::from_str(
            r#"{"nom":"Dupont","prenom":"Jean","adresse":"123 Rue Exemple"}"#,
        )
        .unwrap();

        assert_eq!(payload, NewClient::new("Dupont", "Jean", "123 Rue Exemple"));
        assert_eq!(payload.newsletter, Some(0));
        assert_eq!(payload.genre, None);
    }

    #[test]
    fn create_payload_keeps_explicit_null_newsletter() {
        let payload: NewClient = serde_json::from_str(
            r#"{"nom":"A","prenom":"B","adresse":"C","newsletter":null}"#,
        )
        .unwrap();
        assert_eq!(payload.newsletter, None);
    }

    #[test]
    fn create_payload_ignores_codcli() {
        let payload: NewClient = serde_json::from_str(
            r#"{"codcli":99,"nom":"A","prenom":"B","adresse":"C"}"#,
        )
        .unwrap();
        assert_eq!(payload, NewClient::new("A", "B", "C"));
    }

    #[test]
    fn create_payload_requires_adresse() {
        let err = serde_json::from_str::<NewClient>(r#"{"nom":"A","prenom":"B"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `adresse`"));
    }

    #[test]
    fn empty_patch_has_no_changes() {
        let patch: ClientPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.into_changes().is_empty());
    }

    #[test]
    fn patch_only_lists_present_keys() {
        let patch: ClientPatch =
            serde_json::from_str(r#"{"prenom":"Pierre","tel":null,"newsletter":1}"#).unwrap();

        assert_eq!(
            patch.into_changes(),
            vec![
                ClientChange::Prenom("Pierre".into()),
                ClientChange::Tel(None),
                ClientChange::Newsletter(Some(1)),
            ]
        );
    }

    #[test]
    fn apply_touches_only_the_named_column() {
        let mut client = stored();
        client.apply(ClientChange::Prenom("Pierre".into()));

        let mut expected = stored();
        expected.prenom = "Pierre".into();
        assert_eq!(client, expected);

        client.apply(ClientChange::Genre(None));
        assert_eq!(client.genre, None);
        assert_eq!(client.nom, "Martin");
    }

    #[test]
    fn serializes_every_column() {
        let value = serde_json::to_value(stored()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 9);
        assert_eq!(object["codcli"], 7);
        assert!(object["email"].is_null());
    }
}
