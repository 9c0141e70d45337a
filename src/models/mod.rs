use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Row identifiers arrive as uuid strings or integer keys depending on the table.
fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("unsupported identifier: {other}"))),
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Category {
    #[serde(deserialize_with = "de_id")]
    pub category_id: String,
    pub category_name: String,
    /// Public URL.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Occasion {
    #[serde(deserialize_with = "de_id")]
    pub occasion_id: String,
    pub name: String,
    /// Public URL.
    #[serde(default)]
    pub image_occasions: Option<String>,
}

/// Row of the `users` table.
///
/// `image_url` is a private storage path in the profile bucket, never a URL.
/// It must go through the signed-URL exchange before it can be displayed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct UserProfile {
    #[serde(deserialize_with = "de_id")]
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UserProfile {
    pub fn image_path(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|p| !p.trim().is_empty())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Session {
    pub user_id: String,
}

/// One managed collection of the recipe dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum CollectionKind {
    Category,
    Occasion,
}

impl CollectionKind {
    pub fn table(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Occasion => "occasion",
        }
    }

    pub fn bucket(self) -> &'static str {
        match self {
            Self::Category => "category-images",
            Self::Occasion => "occasion-images",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::Category => "Recipe Category",
            Self::Occasion => "Occasion",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Occasion => "occasions",
        }
    }

    pub fn empty_text(self) -> &'static str {
        match self {
            Self::Category => "No categories available.",
            Self::Occasion => "No occasions available.",
        }
    }

    pub fn add_label(self) -> &'static str {
        match self {
            Self::Category => "+ Add Category",
            Self::Occasion => "+ Add Occasion",
        }
    }

    pub fn dialog_title(self) -> &'static str {
        match self {
            Self::Category => "Add New Category",
            Self::Occasion => "Add New Occasion",
        }
    }

    pub fn name_label(self) -> &'static str {
        match self {
            Self::Category => "Category Name:",
            Self::Occasion => "Occasion Name:",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Category => "Add Category",
            Self::Occasion => "Add Occasion",
        }
    }

    pub fn id_column(self) -> &'static str {
        match self {
            Self::Category => "category_id",
            Self::Occasion => "occasion_id",
        }
    }

    pub fn detail_href(self, id: &str) -> String {
        format!("/recipes/{}/{}", self.as_ref(), urlencoding::encode(id))
    }

    /// Row written by the creation dialog, with the kind's column names.
    pub fn new_row(self, name: &str, image: Option<String>) -> NewRecord {
        match self {
            Self::Category => NewRecord::Category {
                category_name: name.to_string(),
                image,
            },
            Self::Occasion => NewRecord::Occasion {
                name: name.to_string(),
                image_occasions: image,
            },
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub(crate) enum NewRecord {
    Category {
        category_name: String,
        image: Option<String>,
    },
    Occasion {
        name: String,
        image_occasions: Option<String>,
    },
}

/// Resolve the `:kind`/`:id` segments of a detail route.
pub(crate) fn detail_target(kind: &str, id: &str) -> Option<(CollectionKind, String)> {
    let kind = kind.parse::<CollectionKind>().ok()?;
    let id = id.trim();
    (!id.is_empty()).then(|| (kind, id.to_string()))
}

pub(crate) const PLACEHOLDER_IMAGE: &str = "/image/placeholder.png";

/// Card view shared by categories and occasions.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CollectionItem {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
}

impl CollectionItem {
    pub fn image_src(&self) -> String {
        self.image
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
    }
}

impl From<Category> for CollectionItem {
    fn from(c: Category) -> Self {
        Self {
            id: c.category_id,
            name: c.category_name,
            image: non_empty(c.image),
        }
    }
}

impl From<Occasion> for CollectionItem {
    fn from(o: Occasion) -> Self {
        Self {
            id: o.occasion_id,
            name: o.name,
            image: non_empty(o.image_occasions),
        }
    }
}
