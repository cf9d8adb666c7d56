//! HTML presentation of directory listings.
//!
//! Everything here consumes [`DirectoryListing`] data; no filesystem access
//! happens in this module.

use askama::Template;

use crate::listing::{DirectoryListing, format_size};
use crate::media::MediaCategory;

/// One step of the breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct DirLink {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct FileLink {
    pub name: String,
    pub href: String,
    pub icon: &'static str,
    pub size: String,
}

/// Full listing page
///
/// Links are percent-encoded per segment before they get here and are
/// emitted unescaped; names go through the HTML escaper.
#[derive(Template)]
#[template(path = "listing.html")]
pub struct ListingPage {
    pub breadcrumbs: Vec<Crumb>,
    pub parent: Option<String>,
    pub directories: Vec<DirLink>,
    pub files: Vec<FileLink>,
}

impl ListingPage {
    pub fn from_listing(listing: &DirectoryListing) -> Self {
        Self {
            breadcrumbs: breadcrumbs(&listing.path),
            parent: parent_href(&listing.path),
            directories: listing
                .directories
                .iter()
                .map(|dir| DirLink {
                    name: dir.name.clone(),
                    href: listing_href(&dir.path),
                })
                .collect(),
            files: listing
                .files
                .iter()
                .map(|file| FileLink {
                    name: file.name.clone(),
                    href: download_href(&file.path),
                    icon: icon_for(file.category),
                    size: format_size(file.size),
                })
                .collect(),
        }
    }
}

pub fn icon_for(category: MediaCategory) -> &'static str {
    match category {
        MediaCategory::Image => "🖼️",
        MediaCategory::Video => "🎬",
        MediaCategory::Audio => "🎵",
        MediaCategory::Text => "📝",
        MediaCategory::Pdf => "📑",
        MediaCategory::Generic => "📄",
    }
}

/// `Home` followed by one crumb per segment of `relative`.
pub fn breadcrumbs(relative: &str) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb {
        label: "Home".to_string(),
        href: "/".to_string(),
    }];

    let mut current = String::new();
    for part in relative.split('/').filter(|p| !p.is_empty()) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(part);
        crumbs.push(Crumb {
            label: part.to_string(),
            href: listing_href(&current),
        });
    }

    crumbs
}

/// Listing link of the parent directory; `None` at the root.
pub fn parent_href(relative: &str) -> Option<String> {
    let relative = relative.trim_matches('/');
    if relative.is_empty() {
        return None;
    }
    let parent = relative.rsplit_once('/').map_or("", |(parent, _)| parent);
    Some(listing_href(parent))
}

pub fn listing_href(relative: &str) -> String {
    let encoded = encode_path(relative);
    if encoded.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", encoded)
    }
}

pub fn download_href(relative: &str) -> String {
    format!("/download/{}", encode_path(relative))
}

fn encode_path(relative: &str) -> String {
    relative
        .split('/')
        .filter(|p| !p.is_empty())
        .map(|p| urlencoding::encode(p).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
