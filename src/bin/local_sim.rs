extern crate seabed;

use std::collections::{BTreeMap, HashMap, HashSet};

use seabed::{
    planner::{plan, Command, Decision},
    point::Point,
    strategy::Strategy,
    world::{Creature, Drone, Sighting, TurnState, World},
};

use flo_canvas::*;
use flo_draw::*;

use futures::executor;
use futures::prelude::*;

use rand::Rng;

const LIGHT_RADIUS: i32 = 2000;
const DARK_RADIUS: i32 = 800;
const LIGHT_COST: i32 = 5;
const MAX_BATTERY: i32 = 30;
const SURFACE: i32 = 500;

struct SimWorld {
    creatures: Vec<Creature>,
    drones: Vec<Drone>,
    banked: HashSet<i32>,
    visible: HashSet<i32>,
}

impl SimWorld {
    fn gen_random_world() -> Self {
        let mut rng = rand::thread_rng();

        let mut creatures = Vec::new();

        for typ in 0..3 {
            for col in 0..4 {
                let min_depth = (typ + 1) * 2500;
                let max_depth = min_depth + 2500;

                let mut creature = Creature::new(col * 3 + typ, col as i8, typ as i8);
                creature.pos = Some(Point::new(
                    rng.gen_range(0..10000),
                    rng.gen_range(min_depth..max_depth),
                ));
                creatures.push(creature);
            }
        }

        for i in 0..3 {
            let mut monster = Creature::new(12 + i, -1, -1);
            monster.pos = Some(Point::new(
                rng.gen_range(0..10000),
                rng.gen_range(2500..10000),
            ));
            creatures.push(monster);
        }

        let drones = (0..2)
            .map(|i| {
                let pos = Point::new(rng.gen_range(0..10000), rng.gen_range(0..10000));
                Drone::new(i * 2, pos, MAX_BATTERY, false)
            })
            .collect();

        let mut sim = SimWorld {
            creatures,
            drones,
            banked: HashSet::new(),
            visible: HashSet::new(),
        };
        sim.look_around(&[false, false]);
        sim
    }

    fn catalog(&self) -> HashMap<i32, Creature> {
        self.creatures
            .iter()
            .map(|c| (c.id, Creature::new(c.id, c.color, c.typ)))
            .collect()
    }

    fn look_around(&mut self, lights: &[bool]) {
        self.visible.clear();

        for (drone, &light) in self.drones.iter_mut().zip(lights) {
            let radius = if light { LIGHT_RADIUS } else { DARK_RADIUS };

            for c in &self.creatures {
                let Some(pos) = c.pos else { continue };
                if drone.pos.dist(pos) > radius as f64 {
                    continue;
                }

                self.visible.insert(c.id);
                if !c.is_monster() && !self.banked.contains(&c.id) {
                    drone.scans.insert(c.id);
                }
            }

            if drone.pos.y <= SURFACE {
                self.banked.extend(drone.scans.drain());
            }
        }
    }

    fn step(&mut self, commands: &[Command]) {
        let mut lights = Vec::with_capacity(commands.len());

        for (drone, cmd) in self.drones.iter_mut().zip(commands) {
            drone.pos = cmd.pos;

            let light = cmd.light && drone.bat >= LIGHT_COST;
            if light {
                drone.bat -= LIGHT_COST;
            } else {
                drone.bat = (drone.bat + 1).min(MAX_BATTERY);
            }
            lights.push(light);
        }

        self.look_around(&lights);
    }

    fn turn_state(&self) -> TurnState {
        let mut turn = TurnState::default();
        turn.me.scans = self.banked.clone();
        turn.me.drones = self.drones.clone();
        turn.visible = self
            .creatures
            .iter()
            .filter(|c| self.visible.contains(&c.id))
            .filter_map(|c| {
                c.pos.map(|pos| {
                    (
                        c.id,
                        Sighting {
                            pos,
                            speed: Point::default(),
                        },
                    )
                })
            })
            .collect::<BTreeMap<_, _>>();
        turn
    }
}

struct DronePlan {
    from: Point,
    waypoint: Point,
    cmd: Command,
}

fn screen(pos: Point) -> (f32, f32) {
    (pos.x as f32 * 0.1, 1000. - pos.y as f32 * 0.1)
}

fn draw_circle_at_pos(gc: &mut CanvasGraphicsContext, pos: Point, radius: f32, col: Color) {
    let (x, y) = screen(pos);
    gc.new_path();

    gc.circle(x, y, radius);

    gc.fill_color(col);

    gc.fill();
    gc.line_width(1.0);
    gc.stroke_color(Color::Rgba(0.0, 0.0, 0.0, 1.0));
    gc.stroke();
}

fn draw_line(gc: &mut CanvasGraphicsContext, from: Point, to: Point, col: Color) {
    let (x1, y1) = screen(from);
    let (x2, y2) = screen(to);

    gc.new_path();
    gc.move_to(x1, y1);
    gc.line_to(x2, y2);
    gc.line_width(1.0);
    gc.stroke_color(col);
    gc.stroke();
}

fn draw_lines(gc: &mut CanvasGraphicsContext) {
    for y in [250., 500., 750.] {
        gc.new_path();

        gc.move_to(0., y);
        gc.line_to(1000., y);

        gc.rect(0., 0., 1000., 1000.);

        gc.line_width(1.0);
        gc.stroke_color(Color::Rgba(0.0, 0.0, 0.0, 0.3));
        gc.stroke();
    }
}

fn draw_world(gc: &mut CanvasGraphicsContext, world: &SimWorld) {
    for c in &world.creatures {
        let Some(pos) = c.pos else { continue };

        let opacity = if world.visible.contains(&c.id) { 1. } else { 0.4 };

        let color = if c.is_monster() {
            Color::Rgba(1., 0., 0., opacity)
        } else if world.banked.contains(&c.id) {
            Color::Rgba(0.5, 0.5, 0.5, opacity)
        } else {
            Color::Rgba(0., 1., 0., opacity)
        };

        draw_circle_at_pos(gc, pos, 15., color);
    }

    for d in &world.drones {
        draw_circle_at_pos(gc, d.pos, 20., Color::Rgba(0., 0., 1., 1.));
    }
}

fn draw_plans(gc: &mut CanvasGraphicsContext, plans: &[DronePlan]) {
    for p in plans {
        draw_line(gc, p.from, p.waypoint, Color::Rgba(0., 0., 1., 0.3));
        draw_line(gc, p.from, p.cmd.pos, Color::Rgba(0., 0., 1., 1.));

        let color = if p.cmd.light {
            Color::Rgba(1., 1., 0., 1.)
        } else {
            Color::Rgba(0., 0., 0., 1.)
        };
        draw_circle_at_pos(gc, p.cmd.pos, 5., color);
    }
}

struct App {
    sim_world: SimWorld,
    world: World,
    strategy: Strategy,
    plans: Vec<DronePlan>,
    canvas: Canvas,

    draw_plans: bool,
}

impl App {
    fn new(canvas: Canvas) -> Self {
        let sim_world = SimWorld::gen_random_world();
        let world = World::new(sim_world.catalog());

        let mut app = App {
            sim_world,
            world,
            strategy: Strategy::new(),
            plans: Vec::new(),
            canvas,
            draw_plans: true,
        };
        app.replan();
        app
    }

    fn replan(&mut self) {
        self.world.advance(self.sim_world.turn_state());

        let tuning = &self.strategy.tuning;
        self.plans = self
            .world
            .me
            .drones
            .iter()
            .map(|drone| {
                let decision = self.strategy.decide(drone, &self.world);
                let waypoint = match decision {
                    Decision::Surface => Point::new(drone.pos.x, 0),
                    Decision::Pursue { target, .. } => target.pos,
                    Decision::Explore { waypoint } => waypoint,
                };
                DronePlan {
                    from: drone.pos,
                    waypoint,
                    cmd: plan(drone.pos, &decision, tuning),
                }
            })
            .collect();
    }

    fn redraw(&mut self) {
        self.canvas.draw(|gc| {
            gc.clear_all_layers();
            gc.canvas_height(1000.0);
            gc.center_region(0.0, 0.0, 1000.0, 1000.0);

            draw_lines(gc);

            draw_world(gc, &self.sim_world);

            if self.draw_plans {
                draw_plans(gc, &self.plans);
            }
        });
    }

    fn regenerate_map(&mut self) {
        self.sim_world = SimWorld::gen_random_world();
        self.world = World::new(self.sim_world.catalog());
        self.replan();

        self.redraw();
    }

    fn next_turn(&mut self) {
        let commands: Vec<Command> = self.plans.iter().map(|p| p.cmd).collect();
        self.sim_world.step(&commands);
        self.replan();

        tracing::info!(
            turn = self.world.iter,
            banked = self.sim_world.banked.len(),
            "simulated turn"
        );
        self.redraw();
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .compact()
        .init();

    with_2d_graphics(|| {
        executor::block_on(async {
            let (canvas, mut events) = create_canvas_window_with_events("SEABED");

            let mut app = App::new(canvas);

            app.redraw();

            while let Some(event) = events.next().await {
                match event {
                    DrawEvent::KeyDown(_, Some(Key::KeySpace)) => {
                        app.regenerate_map();
                    }
                    DrawEvent::KeyDown(_, Some(Key::KeyEscape)) => {
                        std::process::exit(0);
                    }
                    DrawEvent::KeyDown(_, Some(Key::Key1)) => {
                        app.draw_plans = !app.draw_plans;
                        app.redraw();
                    }
                    DrawEvent::KeyDown(_, Some(Key::Key2)) => {
                        app.next_turn();
                    }
                    _ => {}
                }
            }
        });
    });
}
