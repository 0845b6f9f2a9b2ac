//! Materialises a [`Scene`] as absolutely positioned DOM elements.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use super::events::{attach_hover, attach_link, Handlers};
use crate::error::{Result, ScheduleError};
use crate::render::{classes, px, Scene};

fn dom_error(value: &JsValue) -> ScheduleError {
    ScheduleError::Render(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn create(document: &Document, tag: &str, class: &str) -> Result<HtmlElement> {
    let element = document
        .create_element(tag)
        .map_err(|e| dom_error(&e))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ScheduleError::Render(format!("<{tag}> is not an HTML element")))?;
    element.set_class_name(class);
    Ok(element)
}

fn set_styles(element: &HtmlElement, styles: &[(&str, f32)]) -> Result<()> {
    let style = element.style();
    for &(name, value) in styles {
        style
            .set_property(name, &px(value))
            .map_err(|e| dom_error(&e))?;
    }
    Ok(())
}

fn append(parent: &HtmlElement, child: &HtmlElement) -> Result<()> {
    parent.append_child(child).map_err(|e| dom_error(&e))?;
    Ok(())
}

/// Detached elements for a whole scene, ready to replace a root's contents.
pub(crate) struct Mounted {
    width: f32,
    height: f32,
    left: HtmlElement,
    top: HtmlElement,
    grid: HtmlElement,
    /// Keep alive for as long as the elements exist
    pub(crate) handlers: Handlers,
}

impl Mounted {
    /// Swap the contents of `root` for the built elements.
    pub(crate) fn attach(&self, root: &HtmlElement) -> Result<()> {
        root.set_inner_html("");
        set_styles(root, &[("width", self.width), ("height", self.height)])?;
        append(root, &self.left)?;
        append(root, &self.top)?;
        append(root, &self.grid)
    }
}

/// Create every element of `scene` without touching the page.
pub(crate) fn build(document: &Document, scene: &Scene) -> Result<Mounted> {
    let left = create(document, "div", classes::HEADER_LEFT)?;
    set_styles(&left, &[("top", scene.top_height), ("width", scene.left_width)])?;

    let top = create(document, "div", classes::HEADER_TOP)?;
    set_styles(&top, &[("height", scene.top_height), ("left", scene.left_width)])?;

    let axis_label = create(document, "div", classes::TOP_AXIS_LABEL)?;
    axis_label.set_text_content(Some(scene.top_axis_title.as_str()));
    append(&top, &axis_label)?;

    let grid = create(document, "div", classes::GRID)?;
    set_styles(&grid, &[("left", scene.left_width), ("top", scene.top_height)])?;

    for header in &scene.row_headers {
        let cell = create(document, "div", classes::LEFT_HEADER_CELL)?;
        set_styles(&cell, &[("top", header.rect.y), ("height", header.rect.height)])?;
        cell.set_text_content(Some(header.text.as_str()));
        append(&left, &cell)?;
    }

    for header in &scene.column_headers {
        let cell = create(document, "div", classes::TOP_HEADER_CELL)?;
        set_styles(&cell, &[("left", header.rect.x), ("width", header.rect.width)])?;
        match &header.link {
            Some(link) => {
                let anchor = create(document, "a", "")?;
                anchor
                    .set_attribute("href", link)
                    .map_err(|e| dom_error(&e))?;
                anchor.set_text_content(Some(header.text.as_str()));
                append(&cell, &anchor)?;
            }
            None => cell.set_text_content(Some(header.text.as_str())),
        }
        append(&top, &cell)?;
    }

    let mut handlers = Handlers::new();
    for block in &scene.blocks {
        let cell = create(document, "div", &block.class_name())?;
        set_styles(
            &cell,
            &[
                ("left", block.rect.x),
                ("top", block.rect.y),
                ("width", block.rect.width),
                ("height", block.rect.height),
            ],
        )?;

        let label = create(document, "div", classes::LABEL)?;
        label.set_text_content(Some(block.label_text.as_str()));
        append(&cell, &label)?;

        let main = create(document, "div", classes::MAIN)?;
        if !block.main_text.is_empty() {
            main.set_text_content(Some(block.main_text.as_str()));
        }
        append(&cell, &main)?;

        if let Some(link) = &block.link {
            attach_link(&cell, link, &mut handlers);
        }
        attach_hover(&cell, &mut handlers);
        append(&grid, &cell)?;
    }

    log::debug!(
        "built {} rows, {} columns, {} blocks",
        scene.row_headers.len(),
        scene.column_headers.len(),
        scene.blocks.len()
    );
    Ok(Mounted {
        width: scene.width,
        height: scene.height,
        left,
        top,
        grid,
        handlers,
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::render::render_scene;
    use crate::types::{Block, Column, Grid, ScheduleConfig};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn building_leaves_root_alone_until_attached() {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = create(&document, "div", "").unwrap();
        root.set_inner_html("<p class=\"previous\">old</p>");

        let grid = Grid::with_row_count(2).with_column(Column::new("a").with_block(Block::new(0, 2)));
        let scene = render_scene(&grid, &ScheduleConfig::default()).unwrap();
        let mounted = build(&document, &scene).unwrap();
        assert!(root.query_selector(".previous").unwrap().is_some());
        assert_eq!(mounted.handlers.len(), 2);

        mounted.attach(&root).unwrap();
        assert!(root.query_selector(".previous").unwrap().is_none());
        assert_eq!(root.query_selector_all(".schedule_gridcell").unwrap().length(), 1);
    }
}
