use serde::Deserialize;
use serde::Serialize;

/// Organization as returned by `GET /v1/user/orgs`.
///
/// Only `name` is required; everything else is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiteaOrganization {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    /// Deprecated by Gitea in favour of `name`.
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_payload() {
        let payload = r#"[{
            "id": 3,
            "name": "teamA",
            "full_name": "Team A",
            "username": "teamA",
            "avatar_url": "https://gitea.com/avatars/3",
            "description": "",
            "location": "Dublin",
            "website": "https://example.com",
            "visibility": "public"
        }]"#;

        let organizations: Vec<GiteaOrganization> = serde_json::from_str(payload).unwrap();

        assert_eq!(organizations.len(), 1);
        assert_eq!(organizations[0].id, 3);
        assert_eq!(organizations[0].name, "teamA");
        assert_eq!(organizations[0].location, "Dublin");
    }

    #[test]
    fn test_deserialize_name_only() {
        let organizations: Vec<GiteaOrganization> =
            serde_json::from_str(r#"[{"name": "teamB"}]"#).unwrap();

        assert_eq!(organizations[0].name, "teamB");
        assert!(organizations[0].full_name.is_empty());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let result = serde_json::from_str::<Vec<GiteaOrganization>>(r#"[{"id": 1}]"#);
        assert!(result.is_err());
    }
}
