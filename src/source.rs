use crate::{Field2, Grid2, InjectionLimits, Rgb, Vec2, VecField2};

/// Interior cells covered by a disc brush centred on `pos`.
///
/// Returns `None` when `pos` is not finite or lies within one cell of the
/// border; the brush never writes border cells.
pub fn brush_cells(grid: Grid2, pos: Vec2, radius: f32) -> Option<Vec<(usize, usize)>> {
    if !pos.is_finite() {
        return None;
    }
    let lo = 1.0;
    let hi = (grid.size() - 2) as f32;
    if pos.x < lo || pos.y < lo || pos.x > hi || pos.y > hi {
        return None;
    }
    let cx = pos.x.round() as usize;
    let cy = pos.y.round() as usize;
    let radius = radius.max(0.0);
    let reach = radius.min(grid.size() as f32).ceil() as usize;
    let last = grid.size() - 2;
    let mut cells = Vec::new();
    for y in cy.saturating_sub(reach).max(1)..=(cy + reach).min(last) {
        for x in cx.saturating_sub(reach).max(1)..=(cx + reach).min(last) {
            let dx = x as f32 - cx as f32;
            let dy = y as f32 - cy as f32;
            if dx * dx + dy * dy <= radius * radius {
                cells.push((x, y));
            }
        }
    }
    Some(cells)
}

/// Adds `amount · color / 255` to each density channel inside the brush.
/// Returns `false`, leaving the fields untouched, if the brush is rejected.
pub fn add_density(
    channels: &mut [Field2],
    pos: Vec2,
    amount: f32,
    color: Rgb,
    radius: f32,
    limits: InjectionLimits,
) -> bool {
    let Some(grid) = channels.first().map(Field2::grid) else {
        return false;
    };
    let Some(cells) = brush_cells(grid, pos, radius) else {
        log::trace!("density brush at ({}, {}) rejected", pos.x, pos.y);
        return false;
    };
    let amount = if amount.is_finite() {
        amount.clamp(0.0, limits.max_density)
    } else {
        0.0
    };
    for (channel, weight) in channels.iter_mut().zip(color.unit()) {
        let increment = amount * weight;
        for &(x, y) in &cells {
            channel.add(x, y, increment);
        }
    }
    true
}

/// Adds `amount` to the velocity inside the brush, after capping its length.
pub fn add_velocity(
    velocity: &mut VecField2,
    pos: Vec2,
    amount: Vec2,
    radius: f32,
    limits: InjectionLimits,
) -> bool {
    let Some(cells) = brush_cells(velocity.grid(), pos, radius) else {
        log::trace!("velocity brush at ({}, {}) rejected", pos.x, pos.y);
        return false;
    };
    if !amount.is_finite() {
        return false;
    }
    let amount = amount.clamp_length(limits.max_speed);
    for (x, y) in cells {
        velocity.add(x, y, amount);
    }
    true
}
