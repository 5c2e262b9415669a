//! GTK4 `DrawingArea` wiring: draw callback, pointer gestures, arrow keys
//! and resize all forward into a shared [`SpiralChart`].

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk::prelude::*;
use gtk::{gdk, glib};
use tracing::warn;

use crate::api::SpiralChart;
use crate::core::Viewport;
use crate::interaction::{Key, PointerButton, PointerInput};
use crate::render::{CairoContextRenderer, Renderer};

pub struct GtkChartAdapter<R>
where
    R: Renderer + CairoContextRenderer + 'static,
{
    chart: Rc<RefCell<SpiralChart<R>>>,
    drawing_area: gtk::DrawingArea,
}

impl<R> GtkChartAdapter<R>
where
    R: Renderer + CairoContextRenderer + 'static,
{
    #[must_use]
    pub fn new(chart: SpiralChart<R>) -> Self {
        let viewport = chart.viewport();
        let chart = Rc::new(RefCell::new(chart));
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(viewport.width as i32);
        drawing_area.set_content_height(viewport.height as i32);
        drawing_area.set_focusable(true);

        install_draw(&drawing_area, &chart);
        install_resize(&drawing_area, &chart);
        install_motion(&drawing_area, &chart);
        install_click(&drawing_area, &chart);
        install_keys(&drawing_area, &chart);

        Self {
            chart,
            drawing_area,
        }
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    /// Shared handle for host code driving parameters or data loads.
    #[must_use]
    pub fn chart(&self) -> Rc<RefCell<SpiralChart<R>>> {
        Rc::clone(&self.chart)
    }

    /// Queues a redraw when the chart has a pending frame.
    pub fn sync(&self) {
        queue_if_pending(&self.drawing_area, &self.chart);
    }
}

fn queue_if_pending<R>(area: &gtk::DrawingArea, chart: &Rc<RefCell<SpiralChart<R>>>)
where
    R: Renderer + CairoContextRenderer + 'static,
{
    if chart.borrow().is_frame_pending() {
        area.queue_draw();
    }
}

fn install_draw<R>(area: &gtk::DrawingArea, chart: &Rc<RefCell<SpiralChart<R>>>)
where
    R: Renderer + CairoContextRenderer + 'static,
{
    let chart = Rc::clone(chart);
    area.set_draw_func(move |_, context, _, _| {
        if let Err(err) = chart.borrow_mut().render_on_cairo_context(context) {
            warn!(error = %err, "chart draw failed");
        }
    });
}

fn install_resize<R>(area: &gtk::DrawingArea, chart: &Rc<RefCell<SpiralChart<R>>>)
where
    R: Renderer + CairoContextRenderer + 'static,
{
    let chart = Rc::clone(chart);
    area.connect_resize(move |area, width, height| {
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            return;
        };
        if let Err(err) = chart.borrow_mut().set_viewport(Viewport::new(width, height)) {
            warn!(error = %err, "ignoring resize");
        }
        queue_if_pending(area, &chart);
    });
}

fn install_motion<R>(area: &gtk::DrawingArea, chart: &Rc<RefCell<SpiralChart<R>>>)
where
    R: Renderer + CairoContextRenderer + 'static,
{
    let motion = gtk::EventControllerMotion::new();
    {
        let chart = Rc::clone(chart);
        let area = area.clone();
        motion.connect_motion(move |_, x, y| {
            chart.borrow_mut().pointer_move(PointerInput::new(x, y));
            queue_if_pending(&area, &chart);
        });
    }
    {
        let chart = Rc::clone(chart);
        let area = area.clone();
        motion.connect_leave(move |_| {
            chart.borrow_mut().pointer_leave();
            queue_if_pending(&area, &chart);
        });
    }
    area.add_controller(motion);
}

fn install_click<R>(area: &gtk::DrawingArea, chart: &Rc<RefCell<SpiralChart<R>>>)
where
    R: Renderer + CairoContextRenderer + 'static,
{
    let click = gtk::GestureClick::new();
    click.set_button(0);
    {
        let chart = Rc::clone(chart);
        let area = area.clone();
        click.connect_pressed(move |gesture, _, x, y| {
            area.grab_focus();
            chart.borrow_mut().pointer_down(pointer_input(gesture, x, y));
            queue_if_pending(&area, &chart);
        });
    }
    {
        let chart = Rc::clone(chart);
        let area = area.clone();
        click.connect_released(move |gesture, _, x, y| {
            chart.borrow_mut().pointer_up(pointer_input(gesture, x, y));
            queue_if_pending(&area, &chart);
        });
    }
    area.add_controller(click);
}

fn install_keys<R>(area: &gtk::DrawingArea, chart: &Rc<RefCell<SpiralChart<R>>>)
where
    R: Renderer + CairoContextRenderer + 'static,
{
    let keys = gtk::EventControllerKey::new();
    let chart = Rc::clone(chart);
    let target = area.clone();
    keys.connect_key_pressed(move |_, keyval, _, _| {
        let key = match keyval {
            gdk::Key::Up => Key::Up,
            gdk::Key::Down => Key::Down,
            gdk::Key::Left => Key::Left,
            gdk::Key::Right => Key::Right,
            _ => return glib::Propagation::Proceed,
        };
        chart.borrow_mut().on_key(key);
        queue_if_pending(&target, &chart);
        glib::Propagation::Stop
    });
    area.add_controller(keys);
}

fn pointer_input(gesture: &gtk::GestureClick, x: f64, y: f64) -> PointerInput {
    let button = match gesture.current_button() {
        2 => PointerButton::Middle,
        3 => PointerButton::Secondary,
        _ => PointerButton::Primary,
    };
    let ctrl = gesture
        .current_event_state()
        .contains(gdk::ModifierType::CONTROL_MASK);
    PointerInput::new(x, y).with_button(button).with_ctrl(ctrl)
}
