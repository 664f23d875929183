//! Default settings bundle
//!
//! Declarations for the `boxcar` (floor, car, world, display), `ga`
//! (selection, mutation, crossover, fitness), and `window` controllers.
//! Values are consumed as opaque entries by the simulation and the GA.

use boxcar_common::{population_headers, Kind, TypeConstraint, Value};
use rand::Rng;

use crate::store::SettingStore;
use crate::{BOXCAR_CONTROLLER, GA_CONTROLLER, WINDOW_CONTROLLER};

/// Default bundle with a freshly drawn floor seed
pub fn default_store() -> SettingStore {
    default_store_with_rng(&mut rand::thread_rng())
}

/// Default bundle drawing `gaussian_floor_seed` from `rng`
pub fn default_store_with_rng<R: Rng + ?Sized>(rng: &mut R) -> SettingStore {
    let mut store = SettingStore::new();
    declare_boxcar(&mut store, rng.gen_range(1..=1000));
    declare_ga(&mut store);
    declare_window(&mut store);
    store
}

fn declare_boxcar(store: &mut SettingStore, floor_seed: i64) {
    let float = TypeConstraint::float;
    let int = TypeConstraint::int;
    let c = BOXCAR_CONTROLLER;

    // Floor
    store
        .declare(c, "floor_tile_height", 0.15, float())
        .declare(c, "floor_tile_width", 1, float())
        .declare(c, "max_floor_tiles", 150, int())
        .declare(c, "gaussian_floor_seed", floor_seed, int())
        .declare(c, "min_num_section_per_tile", 1, int())
        .declare(c, "max_num_section_per_tile", 1, int())
        // gaussian, ramp, jagged, holes, walls, flat
        .declare(c, "floor_creation_type", "gaussian", TypeConstraint::str());

    // Floor - gaussian
    store
        .declare(c, "tile_angle_mu", 8, float())
        .declare(c, "tile_angle_std", 15, float())
        .declare(c, "tile_gaussian_denominator", 10, float())
        .declare(c, "tile_gaussian_threshold", 10, int());

    // Floor - ramp. A constant angle wins over the increasing ramp when set.
    store
        .declare(c, "ramp_constant_angle", Value::Absent, TypeConstraint::optional(Kind::Float))
        .declare(c, "ramp_constant_distance", Value::Absent, TypeConstraint::optional(Kind::Float))
        .declare(c, "ramp_increasing_angle", 1.2, TypeConstraint::optional(Kind::Float))
        .declare(c, "ramp_start_angle", 1, TypeConstraint::optional(Kind::Float))
        .declare(c, "ramp_increasing_type", "multiply", TypeConstraint::optional(Kind::Str))
        .declare(c, "ramp_max_angle", 55, float())
        .declare(c, "ramp_approach_distance", 10, float())
        .declare(c, "ramp_distance_needed_to_jump", 10, float());

    // Floor - holes and walls
    store
        .declare(c, "number_of_holes", 5, int())
        .declare(c, "hole_distance_needed_to_jump", 1, float())
        .declare(c, "incremental_distance", 1, float())
        .declare(c, "number_of_walls", 5, int())
        .declare(c, "number_of_wall_tiles", 1, int())
        .declare(c, "wall_tile_incremental", 1, int());

    // Floor - jagged
    store
        .declare(c, "jagged_increasing_angle", 45, float())
        .declare(c, "jagged_decreasing_angle", 45, float());

    // Car
    store
        .declare(c, "car_max_tries", 20, int())
        .declare(c, "min_chassis_axis", 0.1, float())
        .declare(c, "max_chassis_axis", 1.3, float())
        .declare(c, "min_chassis_density", 30.0, float())
        .declare(c, "max_chassis_density", 300.0, float())
        .declare(c, "min_wheel_density", 40.0, float())
        .declare(c, "max_wheel_density", 200.0, float())
        .declare(c, "min_num_wheels", 2, int())
        .declare(c, "max_num_wheels", 7, int())
        .declare(c, "min_wheel_radius", 0.1, float())
        .declare(c, "max_wheel_radius", 0.5, float())
        .declare(c, "min_wheel_vertices_radius", 0.1, float())
        .declare(c, "max_wheel_vertices_radius", 1.3, float())
        .declare(c, "circle_wheel_probability", 0.5, float())
        .declare(c, "min_num_wheels_vertices", 3, int())
        .declare(c, "max_num_wheels_vertices", 8, int())
        .declare(c, "round_length_vertices_coordinates", 6, int());

    // World, x/y
    store.declare(
        c,
        "gravity",
        Value::Tuple(vec![Value::Int(0), Value::Float(-9.8)]),
        TypeConstraint::tuple(),
    );

    // Display
    store
        .declare(c, "show", true, TypeConstraint::bool())
        .declare(c, "fps", 45, int())
        .declare(c, "run_at_a_time", 50, int())
        .declare(c, "should_smooth_camera_to_leader", false, TypeConstraint::bool())
        .declare(c, "show_label", true, TypeConstraint::bool())
        .declare(c, "population_headers", population_headers(), TypeConstraint::str());
}

fn declare_ga(store: &mut SettingStore) {
    let float = TypeConstraint::float;
    let int = TypeConstraint::int;
    let c = GA_CONTROLLER;

    store
        .declare(c, "max_generations", 10, int())
        .declare(c, "min_fitness_value", 1e-10, float());

    // Selection
    store
        .declare(c, "num_parents", 50, int())
        .declare(c, "num_offspring", 50, int())
        .declare(c, "elitism", 0.05, float())
        .declare(c, "selection_type", "plus", TypeConstraint::str())
        .declare(c, "lifespan", 5, float());

    // Mutation
    store
        .declare(c, "mutation_rate", 0.5, float())
        .declare(c, "gaussian_mutation_scale", 0.2, float())
        .declare(c, "mutation_rate_type", "static", TypeConstraint::str());

    // Crossover
    store
        .declare(c, "crossover_probability", 0.5, float())
        .declare(c, "SBX_eta", 1, float())
        .declare(c, "crossover_selection", "tournament", TypeConstraint::str())
        .declare(c, "tournament_size", 5, int());

    // Contact penalty
    store
        .declare(c, "max_contacts_penalty", 50, int())
        .declare(c, "contacts_threshold", 10, int());

    // Fitness function
    store
        .declare(c, "fitness_function", Value::callable("fitness_function"), TypeConstraint::any())
        .declare(c, "fitness_function2", Value::callable("fitness_function2"), TypeConstraint::any());
}

fn declare_window(store: &mut SettingStore) {
    store
        .declare(WINDOW_CONTROLLER, "width", 1920, TypeConstraint::int())
        .declare(WINDOW_CONTROLLER, "height", 1080, TypeConstraint::int());
}
