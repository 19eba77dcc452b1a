use diorama::room::{self, RoomAnimation};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = diorama::default();

    let handles = room::build(app.scene_mut());
    let stats = app.scene_mut().get_statistics();
    log::info!(
        "Room built: {} objects, {} materials, {} lights, {} triangles",
        stats.object_count,
        stats.material_count,
        stats.light_count,
        stats.total_triangles
    );

    let mut animation = RoomAnimation::new(handles);
    app.set_update(move |scene| animation.advance(scene));

    app.run()
}
