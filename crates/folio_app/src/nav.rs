//! Navigation bar
//!
//! State behind the fixed navigation bar, the mobile slide-out menu and the
//! footer links. Every surface navigates the same way: the click closes the
//! mobile menu and the page smooth-scrolls to the destination.

use std::fmt;

use folio_core::KeyCode;
use folio_scroll::SectionAnchor;
use tracing::debug;

/// A navigation entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub anchor: SectionAnchor,
    pub label: &'static str,
}

/// Navigation entries in display order
pub const NAV_ITEMS: [NavItem; 7] = [
    NavItem { anchor: SectionAnchor::Home, label: "首页" },
    NavItem { anchor: SectionAnchor::About, label: "关于" },
    NavItem { anchor: SectionAnchor::Skills, label: "技能" },
    NavItem { anchor: SectionAnchor::Projects, label: "项目" },
    NavItem { anchor: SectionAnchor::Experience, label: "经历" },
    NavItem { anchor: SectionAnchor::Awards, label: "荣誉" },
    NavItem { anchor: SectionAnchor::Contact, label: "联系" },
];

/// Call-to-action label
pub const CTA_LABEL: &str = "联系我";

/// Where a navigation click lands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavTarget {
    Section(SectionAnchor),
    /// Very top of the document
    Top,
}

/// Surface a click came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavSurface {
    Desktop,
    Mobile,
    Footer,
}

impl fmt::Display for NavSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NavSurface::Desktop => "desktop",
            NavSurface::Mobile => "mobile",
            NavSurface::Footer => "footer",
        })
    }
}

/// A clickable navigation element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavLink {
    /// Brand mark, goes home
    Logo,
    Item(SectionAnchor),
    /// "Contact me" button
    CallToAction,
    /// Footer "back to top"
    BackToTop,
}

impl NavLink {
    pub fn destination(self) -> NavTarget {
        match self {
            NavLink::Logo => NavTarget::Section(SectionAnchor::Home),
            NavLink::Item(anchor) => NavTarget::Section(anchor),
            NavLink::CallToAction => NavTarget::Section(SectionAnchor::Contact),
            NavLink::BackToTop => NavTarget::Top,
        }
    }
}

/// Navigation bar state
#[derive(Clone, Debug, PartialEq)]
pub struct NavBar {
    scrolled_threshold: f32,
    scrolled: bool,
    active: SectionAnchor,
    menu_open: bool,
}

impl NavBar {
    pub fn new(scrolled_threshold: f32) -> Self {
        Self {
            scrolled_threshold,
            scrolled: false,
            active: SectionAnchor::Home,
            menu_open: false,
        }
    }

    /// Update the compact style; returns whether it changed
    pub fn on_scroll(&mut self, offset_y: f32) -> bool {
        let scrolled = offset_y > self.scrolled_threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Highlighted entry
    pub fn active(&self) -> SectionAnchor {
        self.active
    }

    pub fn set_active(&mut self, anchor: SectionAnchor) {
        self.active = anchor;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Background scrolling is suspended while the mobile menu is open
    pub fn is_scroll_locked(&self) -> bool {
        self.menu_open
    }

    /// Returns whether the menu was closed before
    pub fn open_menu(&mut self) -> bool {
        let opened = !self.menu_open;
        self.menu_open = true;
        if opened {
            debug!("NavBar: mobile menu opened");
        }
        opened
    }

    /// Returns whether the menu was open before
    pub fn close_menu(&mut self) -> bool {
        let closed = self.menu_open;
        self.menu_open = false;
        if closed {
            debug!("NavBar: mobile menu closed");
        }
        closed
    }

    /// Menu button; returns the new open state
    pub fn toggle_menu(&mut self) -> bool {
        if self.menu_open {
            self.close_menu();
        } else {
            self.open_menu();
        }
        self.menu_open
    }

    /// Escape closes the menu; returns whether it did
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        key == KeyCode::Escape && self.close_menu()
    }

    /// A click on any surface: close the menu and resolve the destination
    pub fn click(&mut self, link: NavLink, surface: NavSurface) -> NavTarget {
        self.close_menu();
        let target = link.destination();
        debug!("NavBar: {:?} clicked on {} -> {:?}", link, surface, target);
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrolled_past_threshold() {
        let mut nav = NavBar::new(100.0);
        assert!(!nav.on_scroll(100.0));
        assert!(!nav.is_scrolled());
        assert!(nav.on_scroll(100.5));
        assert!(nav.is_scrolled());
        assert!(!nav.on_scroll(400.0));
        assert!(nav.on_scroll(0.0));
    }

    #[test]
    fn test_escape_closes_menu_and_unlocks_scroll() {
        let mut nav = NavBar::new(100.0);
        assert!(nav.toggle_menu());
        assert!(nav.is_scroll_locked());

        assert!(!nav.handle_key(KeyCode::Enter));
        assert!(nav.is_menu_open());

        assert!(nav.handle_key(KeyCode::Escape));
        assert!(!nav.is_menu_open());
        assert!(!nav.is_scroll_locked());

        // Escape with the menu closed does nothing
        assert!(!nav.handle_key(KeyCode::Escape));
    }

    #[test]
    fn test_click_resolves_same_on_every_surface() {
        for surface in [NavSurface::Desktop, NavSurface::Mobile, NavSurface::Footer] {
            let mut nav = NavBar::new(100.0);
            nav.open_menu();
            assert_eq!(
                nav.click(NavLink::Item(SectionAnchor::Awards), surface),
                NavTarget::Section(SectionAnchor::Awards)
            );
            assert!(!nav.is_menu_open());
        }
    }

    #[test]
    fn test_special_links() {
        assert_eq!(NavLink::Logo.destination(), NavTarget::Section(SectionAnchor::Home));
        assert_eq!(
            NavLink::CallToAction.destination(),
            NavTarget::Section(SectionAnchor::Contact)
        );
        assert_eq!(NavLink::BackToTop.destination(), NavTarget::Top);
    }

    #[test]
    fn test_items_cover_every_section_in_order() {
        let anchors: Vec<SectionAnchor> = NAV_ITEMS.iter().map(|item| item.anchor).collect();
        assert_eq!(anchors, SectionAnchor::ALL.to_vec());
    }
}
