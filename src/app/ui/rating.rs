// src/app/ui/rating.rs
use eframe::egui as eg;

const STAR_FULL: &str = "★";
const STAR_EMPTY: &str = "☆";

/// Stars lit for a given hover/committed rating: hover wins.
pub fn lit_stars(hover: Option<u8>, current: Option<u8>) -> u8 {
    hover.or(current).unwrap_or(0)
}

/// Row of `max` clickable stars with a numeric readout. Hover previews a
/// value; a click returns it.
pub fn star_rating(
    ui: &mut eg::Ui,
    id_source: impl std::hash::Hash,
    max: u8,
    current: Option<u8>,
) -> Option<u8> {
    let id = ui.make_persistent_id(id_source);
    let mut hover: Option<u8> = None;
    let mut picked: Option<u8> = None;
    let prev_hover = ui.data(|d| d.get_temp::<Option<u8>>(id)).flatten();
    let lit = lit_stars(prev_hover, current);

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        for n in 1..=max {
            let glyph = if n <= lit { STAR_FULL } else { STAR_EMPTY };
            let resp = ui.add(
                eg::Label::new(
                    eg::RichText::new(glyph)
                        .size(22.0)
                        .color(eg::Color32::from_rgb(252, 196, 25)),
                )
                .sense(eg::Sense::click()),
            );
            if resp.hovered() {
                hover = Some(n);
            }
            if resp.clicked() {
                picked = Some(n);
            }
        }
        ui.add_space(8.0);
        let shown = lit_stars(hover, picked.or(current));
        ui.label(
            eg::RichText::new(if shown > 0 { shown.to_string() } else { String::new() })
                .size(18.0)
                .color(eg::Color32::from_rgb(252, 196, 25)),
        );
    });

    ui.data_mut(|d| d.insert_temp(id, hover));
    picked
}

#[cfg(test)]
mod tests {
    use super::lit_stars;

    #[test]
    fn hover_overrides_committed_rating() {
        assert_eq!(lit_stars(None, None), 0);
        assert_eq!(lit_stars(None, Some(7)), 7);
        assert_eq!(lit_stars(Some(3), Some(7)), 3);
    }
}
