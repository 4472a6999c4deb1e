use crate::content::Media;
use crate::media::Bucket;
use crate::scan::Atom;

/// Attach an icon to the link beside it.
///
/// Only a paragraph made of exactly one link and one icon is paired; any
/// other shape is returned untouched.
pub fn associate(atoms: Vec<Atom>) -> Vec<Atom> {
    let pair = match <[Atom; 2]>::try_from(atoms) {
        Ok(pair) => pair,
        Err(atoms) => return atoms,
    };

    match pair {
        [Atom::Media(icon), Atom::Link(mut link)] if is_icon(&icon) => {
            link.icon_before = Some(icon);
            vec![Atom::Link(link)]
        }
        [Atom::Link(mut link), Atom::Media(icon)] if is_icon(&icon) => {
            link.icon_after = Some(icon);
            vec![Atom::Link(link)]
        }
        pair => pair.into(),
    }
}

fn is_icon(media: &Media) -> bool {
    Bucket::of(media) == Bucket::Icons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Link;
    use crate::media::{ICON, IMAGE};
    use pretty_assertions::assert_eq;

    fn link(href: &str) -> Atom {
        Atom::Link(Link {
            href: href.to_string(),
            label: href.to_string(),
            ..Default::default()
        })
    }

    fn media(role: &str) -> Atom {
        Atom::Media(Media {
            url: "x.svg".to_string(),
            role: role.to_string(),
            ..Default::default()
        })
    }

    fn links(atoms: &[Atom]) -> Vec<&Link> {
        atoms
            .iter()
            .filter_map(|a| match a {
                Atom::Link(link) => Some(link),
                Atom::Media(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_icon_before() {
        let atoms = associate(vec![media(ICON), link("/")]);
        assert_eq!(atoms.len(), 1);
        let link = links(&atoms)[0];
        assert_eq!(link.icon_before.as_ref().map(|m| m.url.as_str()), Some("x.svg"));
        assert_eq!(link.icon_after, None);
    }

    #[test]
    fn test_icon_after() {
        let atoms = associate(vec![link("/"), media(ICON)]);
        assert_eq!(atoms.len(), 1);
        assert!(links(&atoms)[0].icon_after.is_some());
    }

    #[test]
    fn test_image_is_not_attached() {
        let atoms = vec![media(IMAGE), link("/")];
        assert_eq!(associate(atoms.clone()), atoms);
    }

    #[test]
    fn test_second_link_prevents_pairing() {
        let atoms = vec![media(ICON), link("/"), link("/about")];
        let result = associate(atoms.clone());
        assert_eq!(result, atoms);
        assert!(links(&result).iter().all(|l| l.icon_before.is_none()));
    }

    #[test]
    fn test_two_icons_stay_separate() {
        let atoms = vec![media(ICON), media(ICON)];
        assert_eq!(associate(atoms.clone()), atoms);
    }
}
