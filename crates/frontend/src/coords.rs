use coordplane_shared::mapper::Viewport;
use coordplane_shared::Pixel;

/// Convert client (viewport) coordinates to element-relative pixel coordinates.
pub fn client_to_element(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> (f64, f64) {
    (client_x - rect_left, client_y - rect_top)
}

/// Pure function: convert element-relative coordinates on the rendered canvas
/// to board CSS pixels. Usable in unit tests (no web_sys dependency).
///
/// The canvas keeps its aspect ratio, so both axes share the scale factor
/// `viewport.width / rendered_w`. Returns `None` for a collapsed element.
pub fn rendered_to_board(
    element_x: f64,
    element_y: f64,
    rendered_w: f64,
    viewport: Viewport,
) -> Option<Pixel> {
    if !(rendered_w > 0.0) || !(viewport.width > 0.0) {
        return None;
    }
    let scale = viewport.width / rendered_w;
    Some(Pixel::new(element_x * scale, element_y * scale))
}

/// Get element-relative pointer coordinates using web_sys, then convert them
/// to board CSS pixels.
pub fn client_to_board(client_x: f64, client_y: f64, element_id: &str, viewport: Viewport) -> Option<Pixel> {
    let rect = element_rect(element_id)?;
    let (x, y) = client_to_element(client_x, client_y, rect.left(), rect.top());
    rendered_to_board(x, y, rect.width(), viewport)
}

/// Current width of an element, if it is in the document.
pub fn element_width(element_id: &str) -> Option<f64> {
    element_rect(element_id).map(|r| r.width())
}

fn element_rect(element_id: &str) -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(element_id)?;
    Some(element.get_bounding_client_rect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_element_origin() {
        let (x, y) = client_to_element(100.0, 200.0, 100.0, 200.0);
        assert!((x - 0.0).abs() < 1e-9);
        assert!((y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_to_element_offset() {
        let (x, y) = client_to_element(450.0, 350.0, 320.0, 50.0);
        assert!((x - 130.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_rendered_to_board_unscaled() {
        let vp = Viewport::new(600.0, 450.0);
        let p = rendered_to_board(120.0, 80.0, 600.0, vp).unwrap();
        assert_eq!(p, Pixel::new(120.0, 80.0));
    }

    #[test]
    fn test_rendered_to_board_css_shrunk() {
        // Canvas drawn at 600px but squeezed to 300px by CSS.
        let vp = Viewport::new(600.0, 450.0);
        let p = rendered_to_board(150.0, 100.0, 300.0, vp).unwrap();
        assert!((p.x - 300.0).abs() < 1e-9);
        assert!((p.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_rendered_to_board_collapsed_element() {
        let vp = Viewport::new(600.0, 450.0);
        assert!(rendered_to_board(10.0, 10.0, 0.0, vp).is_none());
        assert!(rendered_to_board(10.0, 10.0, f64::NAN, vp).is_none());
    }
}
