use std::path::PathBuf;

use indexmap::IndexMap;

/// Group an explicit script belongs to. Groups are emitted in declaration
/// order: plain, var, framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Scripts under the owner's htdocs directory
    Plain,
    /// Runtime or generated scripts under the owner's var htdocs directory
    Var,
    /// Scripts shipped by the framework for the owner
    Framework,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Plain, SourceKind::Var, SourceKind::Framework];

    /// Label used in bundle banners.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Plain => "scripts",
            SourceKind::Var => "var scripts",
            SourceKind::Framework => "framework scripts",
        }
    }
}

/// Ordered paths per owner module.
///
/// Owners keep the position of their first insertion; adding to a known
/// owner appends after its existing paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedPaths {
    entries: IndexMap<String, Vec<PathBuf>>,
}

impl OwnedPaths {
    pub fn add<I, P>(&mut self, owner: impl Into<String>, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.entries
            .entry(owner.into())
            .or_default()
            .extend(paths.into_iter().map(Into::into));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.entries
            .iter()
            .map(|(owner, paths)| (owner.as_str(), paths.as_slice()))
    }

    pub fn get(&self, owner: &str) -> Option<&[PathBuf]> {
        self.entries.get(owner).map(Vec::as_slice)
    }

    /// Number of paths across all owners.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Explicit scripts of a bundle, one [`OwnedPaths`] per [`SourceKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceGroups {
    plain: OwnedPaths,
    var: OwnedPaths,
    framework: OwnedPaths,
}

impl SourceGroups {
    pub fn add<I, P>(&mut self, kind: SourceKind, owner: impl Into<String>, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.group_mut(kind).add(owner, paths);
    }

    pub fn group(&self, kind: SourceKind) -> &OwnedPaths {
        match kind {
            SourceKind::Plain => &self.plain,
            SourceKind::Var => &self.var,
            SourceKind::Framework => &self.framework,
        }
    }

    fn group_mut(&mut self, kind: SourceKind) -> &mut OwnedPaths {
        match kind {
            SourceKind::Plain => &mut self.plain,
            SourceKind::Var => &mut self.var,
            SourceKind::Framework => &mut self.framework,
        }
    }

    /// Every `(kind, owner, paths)` in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceKind, &str, &[PathBuf])> {
        SourceKind::ALL.into_iter().flat_map(move |kind| {
            self.group(kind)
                .iter()
                .map(move |(owner, paths)| (kind, owner, paths))
        })
    }

    pub fn len(&self) -> usize {
        self.plain.len() + self.var.len() + self.framework.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_to_an_owner_appends() {
        let mut paths = OwnedPaths::default();
        paths.add("app", ["a.js", "b.js"]);
        paths.add("lib", ["x.js"]);
        paths.add("app", ["c.js"]);

        let owners: Vec<_> = paths.iter().map(|(owner, _)| owner).collect();
        assert_eq!(owners, vec!["app", "lib"]);
        assert_eq!(
            paths.get("app").unwrap(),
            &[PathBuf::from("a.js"), PathBuf::from("b.js"), PathBuf::from("c.js")]
        );
        assert_eq!(paths.len(), 4);
    }

    #[test]
    fn groups_iterate_in_kind_order() {
        let mut groups = SourceGroups::default();
        groups.add(SourceKind::Framework, "core", ["f.js"]);
        groups.add(SourceKind::Var, "app", ["v.js"]);
        groups.add(SourceKind::Plain, "app", ["p.js"]);

        let order: Vec<_> = groups.iter().map(|(kind, owner, _)| (kind, owner)).collect();
        assert_eq!(
            order,
            vec![
                (SourceKind::Plain, "app"),
                (SourceKind::Var, "app"),
                (SourceKind::Framework, "core"),
            ]
        );
    }
}
