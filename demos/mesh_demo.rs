//! Meshing a small patch of terrain
//!
//! Registers the basic blocks plus one block authored as JSON, fills a 3x3
//! grid of chunks with rolling terrain, a pond and some flowers, then meshes
//! every chunk in the background and prints the mesh statistics.

use voxel_mesh_core::renderer::texture_atlas_operations;
use voxel_mesh_core::world::blocks::basic_blocks::TERRAIN_ATLAS;
use voxel_mesh_core::{
    chunk_operations, create_default_textures, register_basic_blocks, BlockDefinition,
    BlockRegistry, BlockType, ChunkData, ChunkDimensions, ChunkNeighbors, ChunkPos, DirtyChunks,
    MeshJob, MeshScheduler, MesherConfig,
};
use std::collections::HashMap;

const MOSSY_STONE: BlockType = BlockType(40);

const MOSSY_STONE_JSON: &str = r#"{
    "block_type": 40,
    "name": "Mossy Stone",
    "sides": {
        "Top": "terrain#7",
        "Bottom": "terrain#3",
        "North": "terrain#3",
        "South": "terrain#3",
        "East": "terrain#3",
        "West": "terrain#3"
    }
}"#;

const CONFIG_TOML: &str = r#"
boundary_policy = "opaque"
greedy = true

[dimensions]
width = 16
height = 32
depth = 16
"#;

fn terrain_height(wx: i32, wz: i32) -> i32 {
    let h = 10.0 + 3.0 * (wx as f32 * 0.2).sin() + 2.0 * (wz as f32 * 0.15).cos();
    h as i32
}

fn generate_chunk(position: ChunkPos, dims: ChunkDimensions) -> anyhow::Result<ChunkData> {
    let mut chunk = chunk_operations::create_chunk(position, dims);
    let origin = chunk_operations::world_origin(&chunk);

    for z in 0..dims.depth as i32 {
        for x in 0..dims.width as i32 {
            let wx = origin.x + x;
            let wz = origin.z + z;
            let height = terrain_height(wx, wz);

            for y in 0..=height {
                let block = match y {
                    0 => BlockType::BEDROCK,
                    _ if y == height => BlockType::GRASS,
                    _ if y + 3 >= height => BlockType::DIRT,
                    _ if (wx + y + wz) % 7 == 0 => MOSSY_STONE,
                    _ => BlockType::STONE,
                };
                chunk_operations::set_block_type(&mut chunk, x, y, z, block)?;
            }

            // Pond in the lowest ground
            if height < 9 {
                for y in height + 1..=9 {
                    chunk_operations::set_block_type(&mut chunk, x, y, z, BlockType::WATER)?;
                }
            } else if (wx * 31 + wz * 17) % 11 == 0 {
                chunk_operations::set_block_type(&mut chunk, x, height + 1, z, BlockType::FLOWER)?;
            }
        }
    }

    Ok(chunk)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    println!("Voxel Chunk Meshing Example");
    println!("===========================");

    let config = MesherConfig::from_toml_str(CONFIG_TOML)?;
    let dims = config.dimensions;

    let textures = create_default_textures();
    let registry = BlockRegistry::new();
    let faces = register_basic_blocks(&registry, &textures)?;
    let mossy: BlockDefinition = serde_json::from_str(MOSSY_STONE_JSON)?;
    let faces = faces + registry.register(mossy, &textures)?;
    println!(
        "Registered {} block types ({} faces) against {} textures",
        registry.len(),
        faces,
        textures.texture_count()
    );
    if let Some(atlas) = textures.atlas(TERRAIN_ATLAS) {
        println!(
            "Terrain atlas: {} tiles, {:.1}% used",
            texture_atlas_operations::tile_count(atlas),
            texture_atlas_operations::utilization(atlas)
        );
    }

    let mut chunks: HashMap<ChunkPos, ChunkData> = HashMap::new();
    let mut dirty = DirtyChunks::new();
    for cz in -1..=1 {
        for cx in -1..=1 {
            let position = ChunkPos::new(cx, 0, cz);
            chunks.insert(position, generate_chunk(position, dims)?);
            dirty.mark_dirty(position);
        }
    }

    let mut scheduler = MeshScheduler::new(config);
    for position in dirty.take_dirty() {
        let Some(chunk) = chunks.get(&position) else {
            continue;
        };
        let neighbors = ChunkNeighbors::from_lookup(position, |p| chunks.get(&p));
        scheduler.request(MeshJob::snapshot(chunk, &neighbors, &registry));
    }
    println!("Queued {} mesh builds", scheduler.pending());

    let mut results = scheduler.wait_idle();
    results.sort_by_key(|r| (r.position.x, r.position.z));
    for result in &results {
        println!(
            "Chunk ({:>2}, {:>2}) gen {}: {}",
            result.position.x,
            result.position.z,
            result.generation,
            result.mesh.stats()
        );
    }

    // Dig a hole at the chunk edge; both chunks sharing the border need a rebuild
    let center = ChunkPos::new(0, 0, 0);
    if let Some(chunk) = chunks.get_mut(&center) {
        let top = terrain_height(0, 5);
        chunk_operations::set_block_type(chunk, 0, top, 5, BlockType::AIR)?;
        dirty.mark_block_changed(center, dims, 0, top, 5);
    }

    let rebuild = dirty.take_dirty();
    println!("\nEdited chunk border, {} chunks dirty", rebuild.len());
    for position in rebuild {
        let Some(chunk) = chunks.get(&position) else {
            continue;
        };
        let neighbors = ChunkNeighbors::from_lookup(position, |p| chunks.get(&p));
        let result = scheduler.build_now(MeshJob::snapshot(chunk, &neighbors, &registry));
        println!(
            "Chunk ({:>2}, {:>2}) gen {}: {}",
            position.x,
            position.z,
            result.generation,
            result.mesh.stats()
        );
    }

    // Unload a corner chunk
    let corner = ChunkPos::new(-1, 0, -1);
    chunks.remove(&corner);
    scheduler.forget(corner);
    println!(
        "\nUnloaded chunk ({}, {}), tracking {} chunks",
        corner.x,
        corner.z,
        scheduler.tracked_chunks()
    );

    Ok(())
}
