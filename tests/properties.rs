use proptest::prelude::*;
use stable_fluids::{
    enforce_bounds, Boundary, CpuExecutor, Field2, FluidParams, FluidState, Grid2, Rgb, Vec2,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn clear_zeroes_everything(
        size in 3usize..40,
        px in 0.0f32..40.0,
        py in 0.0f32..40.0,
        vx in -5.0f32..5.0,
        vy in -5.0f32..5.0,
        ticks in 0usize..3,
    ) {
        let params = FluidParams::new(size, 0.001, 0.001, 0.1).with_iterations(4);
        let mut fluid = FluidState::with_executor(params, CpuExecutor::serial()).unwrap();
        let pos = Vec2::new(px, py);
        fluid.add_density(pos, 3.0, Rgb::WHITE, 2.0);
        fluid.add_velocity(pos, Vec2::new(vx, vy), 2.0);
        fluid.add_tracer(pos, Rgb::WHITE);
        for _ in 0..ticks {
            fluid.update();
        }
        fluid.clear();
        prop_assert!(fluid.tracers().is_empty());
        prop_assert_eq!(fluid.velocity().max_speed(), 0.0);
        for channel in fluid.densities() {
            prop_assert_eq!(channel.abs_max(), 0.0);
        }
    }

    #[test]
    fn reflect_mirrors_every_edge(
        size in 3usize..24,
        values in proptest::collection::vec(-100.0f32..100.0, 576),
    ) {
        let grid = Grid2::new(size);
        let mut field = Field2::from_fn(grid, |x, y| values[y * size + x]);
        enforce_bounds(&mut field, Boundary::REFLECT);
        let last = size - 1;
        for i in 1..last {
            prop_assert_eq!(field.get(0, i), -field.get(1, i));
            prop_assert_eq!(field.get(last, i), -field.get(last - 1, i));
            prop_assert_eq!(field.get(i, 0), -field.get(i, 1));
            prop_assert_eq!(field.get(i, last), -field.get(i, last - 1));
        }
        prop_assert_eq!(field.get(0, 0), 0.5 * (field.get(1, 0) + field.get(0, 1)));
        prop_assert_eq!(
            field.get(last, 0),
            0.5 * (field.get(last - 1, 0) + field.get(last, 1))
        );
    }

    #[test]
    fn tracers_stay_inside_the_grid(
        size in 5usize..24,
        vx in -10.0f32..10.0,
        vy in -10.0f32..10.0,
    ) {
        let params = FluidParams::new(size, 0.0, 0.0, 0.2).with_iterations(4);
        let mut fluid = FluidState::with_executor(params, CpuExecutor::serial()).unwrap();
        let center = Vec2::new(size as f32 * 0.5, size as f32 * 0.5);
        fluid.add_tracer(center, Rgb::WHITE);
        fluid.add_velocity(center, Vec2::new(vx, vy), 2.0);
        let max = (size - 1) as f32;
        for _ in 0..4 {
            fluid.update();
            for tracer in fluid.tracers().iter() {
                prop_assert!(tracer.pos.x >= 0.0 && tracer.pos.x <= max);
                prop_assert!(tracer.pos.y >= 0.0 && tracer.pos.y <= max);
            }
        }
    }
}
