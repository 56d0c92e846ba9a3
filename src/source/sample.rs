//! Built-in sample records.
//!
//! Lets the widget run offline and gives headless tests a stable collection.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::RecordSource;
use crate::error::Result;

const SAMPLE_USERS: &[(&str, &str, &str)] = &[
    ("Leanne Graham", "Bret", "Sincere@april.biz"),
    ("Ervin Howell", "Antonette", "Shanna@melissa.tv"),
    ("Clementine Bauch", "Samantha", "Nathan@yesenia.net"),
    ("Patricia Lebsack", "Karianne", "Julianne.OConner@kory.org"),
    ("Chelsey Dietrich", "Kamren", "Lucio_Hettinger@annie.ca"),
    ("Mrs. Dennis Schulist", "Leopoldo_Corkery", "Karley_Dach@jasper.info"),
    ("Kurtis Weissnat", "Elwyn.Skiles", "Telly.Hoeger@billy.biz"),
    ("Nicholas Runolfsdottir V", "Maxime_Nienow", "Sherwood@rosamond.me"),
    ("Glenna Reichert", "Delphine", "Chaim_McDermott@dana.io"),
    ("Clementina DuBuque", "Moriah.Stanton", "Rey.Padberg@karina.biz"),
];

/// Ten user records with `id`, `name`, `username` and `email` fields.
#[derive(Debug, Clone, Default)]
pub struct SampleSource;

impl SampleSource {
    pub fn new() -> Self {
        Self
    }

    /// Returns the sample records.
    pub fn records() -> Vec<Value> {
        SAMPLE_USERS
            .iter()
            .enumerate()
            .map(|(idx, (name, username, email))| {
                json!({
                    "id": idx + 1,
                    "name": name,
                    "username": username,
                    "email": email,
                })
            })
            .collect()
    }
}

#[async_trait]
impl RecordSource for SampleSource {
    fn location(&self) -> String {
        "sample:".to_string()
    }

    async fn load(&self) -> Result<Vec<Value>> {
        Ok(Self::records())
    }
}
