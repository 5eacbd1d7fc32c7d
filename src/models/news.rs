use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct NewsItemTag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewNewsItemTag {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct NewsItem {
    pub id: i64,
    pub featured_image: String,
    pub title: String,
    pub subtitle: String,
    pub pub_date: DateTime<Utc>,
    pub text: String,
    pub author: Option<String>,
    pub tag_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewNewsItem {
    pub featured_image: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub text: String,
    pub author: Option<String>,
    #[serde(alias = "tag")]
    pub tag_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsItemUpdate {
    pub featured_image: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
    pub text: Option<String>,
    pub author: Option<String>,
    #[serde(alias = "tag")]
    pub tag_id: Option<i64>,
}

impl NewsItemUpdate {
    pub fn apply(self, item: &mut NewsItem) {
        if let Some(featured_image) = self.featured_image {
            item.featured_image = featured_image;
        }
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            item.subtitle = subtitle;
        }
        if let Some(pub_date) = self.pub_date {
            item.pub_date = pub_date;
        }
        if let Some(text) = self.text {
            item.text = text;
        }
        if self.author.is_some() {
            item.author = self.author;
        }
        if self.tag_id.is_some() {
            item.tag_id = self.tag_id;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItemView {
    pub id: i64,
    pub featured_image: String,
    pub title: String,
    pub subtitle: String,
    pub pub_date: DateTime<Utc>,
    pub text: String,
    pub author: Option<String>,
    pub tag: Option<NewsItemTag>,
}

impl NewsItemView {
    pub fn new(item: NewsItem, tag: Option<NewsItemTag>) -> Self {
        Self {
            id: item.id,
            featured_image: item.featured_image,
            title: item.title,
            subtitle: item.subtitle,
            pub_date: item.pub_date,
            text: item.text,
            author: item.author,
            tag,
        }
    }
}
