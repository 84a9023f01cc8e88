//! Rewriting absolute corpus URLs into page-relative links.
//!
//! Generated pages live two directory levels below the repository segment
//! (`<repo>/docs/...`), so a page's depth below the documentation root is the number
//! of path segments from the repository name to the page's directory, minus two.

/// Segments between the repository name and the documentation root, inclusive.
const PAGE_DEPTH_OFFSET: usize = 2;

/// File appended to the home record's rewritten URL.
const HOME_INDEX_FILE: &str = "index.html";

/// Fixed layout of the generated site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    /// Origin the site was generated against, with a trailing slash.
    pub base_url: String,
    /// Repository name segment.
    pub repo_name: String,
    /// Section title of the home record.
    pub home_index_title: String,
}

impl SiteLayout {
    /// Creates a layout description.
    pub fn new(
        base_url: impl Into<String>,
        repo_name: impl Into<String>,
        home_index_title: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            repo_name: repo_name.into(),
            home_index_title: home_index_title.into(),
        }
    }

    /// Builds a rewriter for the page at `page_path`.
    pub fn rewriter_for_page(&self, page_path: &str) -> UrlRewriter {
        self.rewriter_at_depth(page_depth(page_path, &self.repo_name))
    }

    /// Builds a rewriter for a page `depth` levels below the documentation root.
    pub fn rewriter_at_depth(&self, depth: usize) -> UrlRewriter {
        UrlRewriter {
            site_prefix: format!("{}{}", self.base_url, self.repo_name),
            relative_prefix: relative_prefix(depth),
            home_index_title: self.home_index_title.clone(),
            depth,
        }
    }
}

/// Rewrites absolute record URLs relative to one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRewriter {
    /// `<base_url><repo_name>`, the part of every URL being replaced.
    site_prefix: String,
    /// `./` or a run of `../`.
    relative_prefix: String,
    /// Records with this section title point at the site index.
    home_index_title: String,
    /// Depth the prefix was computed for.
    depth: usize,
}

impl UrlRewriter {
    /// Returns the page depth below the documentation root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the relative prefix substituted for the site prefix.
    pub fn relative_prefix(&self) -> &str {
        &self.relative_prefix
    }

    /// Rewrites one record URL.
    ///
    /// The first occurrence of the site prefix is replaced by the relative prefix. URLs that
    /// don't contain the site prefix are left unchanged, except that the home record always
    /// gets `index.html` appended.
    pub fn rewrite(&self, section_title: &str, url: &str) -> String {
        let mut rewritten = match url.find(&self.site_prefix) {
            Some(at) => {
                let rest = &url[at + self.site_prefix.len()..];
                let rest = rest.strip_prefix('/').unwrap_or(rest);
                format!("{}{}{}", &url[..at], self.relative_prefix, rest)
            }
            None => url.to_string(),
        };

        if section_title == self.home_index_title {
            rewritten.push_str(HOME_INDEX_FILE);
        }

        rewritten
    }
}

/// Computes a page's depth below the documentation root.
///
/// The page's directory is cut at the last occurrence of `repo_name`; the remaining
/// `/`-separated segments, minus two, give the depth. Pages at or above the documentation
/// root have depth zero.
pub fn page_depth(page_path: &str, repo_name: &str) -> usize {
    let dir = page_path.rfind('/').map_or("", |i| &page_path[..i]);
    let from_repo = if repo_name.is_empty() {
        dir
    } else {
        dir.rfind(repo_name).map_or(dir, |i| &dir[i..])
    };
    from_repo.split('/').count().saturating_sub(PAGE_DEPTH_OFFSET)
}

/// Returns the relative path from a page at `depth` back to the documentation root.
pub fn relative_prefix(depth: usize) -> String {
    if depth == 0 {
        String::from("./")
    } else {
        "../".repeat(depth)
    }
}
