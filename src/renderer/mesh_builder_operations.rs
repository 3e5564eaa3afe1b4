//! Mesh Builder Operations - Pure DOP Functions
//!
//! Turns one chunk plus its loaded neighbors into `MeshData`:
//! - solid faces are culled against their neighbors and greedily merged per plane
//! - billboards and items become one camera-facing quad each
//! - liquids get per-cell faces with a lowered surface
//!
//! Missing textures skip the face with a warning; they never fail the build.

use super::mesh_builder_data::{MergedFace, MeshBuilderData};
use super::mesh_data::MeshData;
use super::mesh_utils::{corner_order, corner_position, face_depth, push_quad, tile_coord, vertex_rgb};
use super::texture_library::TextureRegion;
use super::vertex::{BillboardVertex, FluidVertex, SolidVertex};
use crate::config::{BoundaryFacePolicy, MesherConfig};
use crate::constants::voxel::MAX_WATER_LEVEL;
use crate::world::blocks::BlockDefinition;
use crate::world::core::{registry_operations, BlockRegistryData, BlockSide, BlockType, ResolvedBlock};
use crate::world::storage::chunk_operations::{self, linear_index};
use crate::world::storage::{ChunkData, ChunkNeighbors, VoxelCell};
use bit_vec::BitVec;
use rustc_hash::FxHashSet;

/// Inputs shared by every pass of one build
struct BuildContext<'a> {
    chunk: &'a ChunkData,
    neighbors: ChunkNeighbors<'a>,
    registry: &'a BlockRegistryData,
    config: &'a MesherConfig,
    /// World-space minimum corner of the chunk
    origin: [f32; 3],
}

/// What lies across a face
enum Adjacent {
    Cell(VoxelCell),
    Unloaded,
}

/// Create new mesh builder scratch data
pub fn create_mesh_builder() -> MeshBuilderData {
    MeshBuilderData {
        plane: Vec::new(),
        visited: BitVec::new(),
        warned: FxHashSet::default(),
        solid_texture: None,
        mixed_textures_warned: false,
        source_faces: 0,
    }
}

/// Clear per-build state, keeping allocations
pub fn clear(data: &mut MeshBuilderData) {
    data.plane.clear();
    data.visited.truncate(0);
    data.warned.clear();
    data.solid_texture = None;
    data.mixed_textures_warned = false;
    data.source_faces = 0;
}

/// Build the mesh of one chunk with fresh scratch data
pub fn build_chunk_mesh(
    chunk: &ChunkData,
    neighbors: &ChunkNeighbors<'_>,
    registry: &BlockRegistryData,
    config: &MesherConfig,
) -> MeshData {
    let mut data = create_mesh_builder();
    build_chunk_mesh_with(&mut data, chunk, neighbors, registry, config)
}

/// Build the mesh of one chunk, reusing `data` between calls
///
/// The chunk must not be mutated while this runs; callers hand in a snapshot
/// or hold it exclusively.
pub fn build_chunk_mesh_with(
    data: &mut MeshBuilderData,
    chunk: &ChunkData,
    neighbors: &ChunkNeighbors<'_>,
    registry: &BlockRegistryData,
    config: &MesherConfig,
) -> MeshData {
    clear(data);
    let mut mesh = MeshData::empty(chunk.position);

    if chunk_operations::non_air_count(chunk) == 0 {
        return mesh;
    }

    let origin = chunk_operations::world_origin(chunk);
    let ctx = BuildContext {
        chunk,
        neighbors: *neighbors,
        registry,
        config,
        origin: [origin.x as f32, origin.y as f32, origin.z as f32],
    };

    for side in BlockSide::ALL {
        build_solid_side(data, &ctx, &mut mesh, side);
    }
    build_sprites(data, &ctx, &mut mesh);
    build_fluids(data, &ctx, &mut mesh);

    mesh.solid_texture = data.solid_texture;
    mesh.source_faces = data.source_faces;

    log::debug!(
        "Built chunk ({}, {}, {}): {}",
        chunk.position.x,
        chunk.position.y,
        chunk.position.z,
        mesh.stats()
    );
    mesh
}

// ============================================================================
// VISIBILITY
// ============================================================================

#[inline]
fn cell_at(chunk: &ChunkData, p: [i32; 3]) -> VoxelCell {
    chunk.cells[linear_index(chunk.dimensions, p[0], p[1], p[2])]
}

/// Cell across `side` from the in-chunk cell `p`, looking into neighbors at the edge
fn adjacent(ctx: &BuildContext, p: [i32; 3], side: BlockSide) -> Adjacent {
    let (dx, dy, dz) = side.offset();
    if let Some(cell) = chunk_operations::try_get(ctx.chunk, p[0] + dx, p[1] + dy, p[2] + dz) {
        return Adjacent::Cell(cell);
    }
    match ctx.neighbors.cell_across(side, p[0], p[1], p[2]) {
        Some(cell) => Adjacent::Cell(cell),
        None => Adjacent::Unloaded,
    }
}

/// Liquid level with 0 counted as a full source block
#[inline]
fn effective_level(cell: VoxelCell) -> u8 {
    match cell.water_level() {
        0 => MAX_WATER_LEVEL,
        level => level,
    }
}

/// Decide whether the `side` face of the block in `cell` at `p` is exposed
fn is_face_visible(
    ctx: &BuildContext,
    def: &BlockDefinition,
    cell: VoxelCell,
    p: [i32; 3],
    side: BlockSide,
) -> bool {
    // A lowered top is never flush with the block above
    if side == BlockSide::Top && def.height < 1.0 && !def.is_liquid {
        return true;
    }

    let neighbor = match adjacent(ctx, p, side) {
        Adjacent::Cell(cell) => cell,
        Adjacent::Unloaded => return ctx.config.boundary_policy == BoundaryFacePolicy::Empty,
    };
    if neighbor.is_air() {
        return true;
    }

    // Unknown content never occludes
    let Some(other) = registry_operations::get_definition(ctx.registry, neighbor.block_type()) else {
        return true;
    };

    if def.is_liquid {
        if other.is_liquid {
            if neighbor.block_type() != cell.block_type() {
                return true;
            }
            // A cell under the same liquid rises to full height, so stacked
            // cells are flush and their Top/Bottom faces never show
            return side.is_vertical() && effective_level(neighbor) < effective_level(cell);
        }
        return !other.occludes();
    }

    if other.is_liquid || other.is_sprite() || other.height < 1.0 {
        return true;
    }
    if other.is_transparent {
        return !def.is_transparent;
    }
    false
}

fn warn_missing_texture(data: &mut MeshBuilderData, block_type: BlockType, side: BlockSide) {
    if data.warned.insert((block_type, side)) {
        log::warn!(
            "No texture for {} ({}) {} face, skipping",
            block_type,
            block_type.0,
            side
        );
    }
}

/// Texture of one face, warning once per build when it is missing
fn face_texture(
    data: &mut MeshBuilderData,
    block: &ResolvedBlock,
    side: BlockSide,
) -> Option<TextureRegion> {
    let region = block.side_textures[side.index()];
    if region.is_none() {
        warn_missing_texture(data, block.definition.block_type, side);
    }
    region
}

// ============================================================================
// SOLID PASS
// ============================================================================

/// Build every plane of one side
fn build_solid_side(
    data: &mut MeshBuilderData,
    ctx: &BuildContext,
    mesh: &mut MeshData,
    side: BlockSide,
) {
    let dims = ctx.chunk.dimensions;
    let (u_axis, v_axis) = side.plane_axes();
    let plane_width = dims.extent(u_axis) as usize;
    let plane_height = dims.extent(v_axis) as usize;

    for layer in 0..dims.extent(side.axis()) as i32 {
        let len = plane_width * plane_height;
        data.plane.clear();
        data.plane.resize(len, BlockType::AIR);
        data.visited.truncate(0);
        data.visited.grow(len, false);

        fill_plane(data, ctx, mesh, side, layer, plane_width, plane_height);
        build_layer_quads(data, ctx, mesh, side, layer, plane_width, plane_height);
    }
}

fn plane_coord(side: BlockSide, layer: i32, u: usize, v: usize) -> [i32; 3] {
    let (u_axis, v_axis) = side.plane_axes();
    let mut p = [0; 3];
    p[side.axis()] = layer;
    p[u_axis] = u as i32;
    p[v_axis] = v as i32;
    p
}

/// Mark the faces of one plane that should be emitted
///
/// Partial-height blocks are emitted right away, unmerged.
fn fill_plane(
    data: &mut MeshBuilderData,
    ctx: &BuildContext,
    mesh: &mut MeshData,
    side: BlockSide,
    layer: i32,
    plane_width: usize,
    plane_height: usize,
) {
    for v in 0..plane_height {
        for u in 0..plane_width {
            let p = plane_coord(side, layer, u, v);
            let cell = cell_at(ctx.chunk, p);
            if cell.is_air() {
                continue;
            }
            let block_type = cell.block_type();
            let Some(block) = registry_operations::get_block(ctx.registry, block_type) else {
                warn_missing_texture(data, block_type, side);
                continue;
            };
            let def = &block.definition;
            if def.is_sprite() || def.is_liquid {
                continue;
            }
            if !is_face_visible(ctx, def, cell, p, side) {
                continue;
            }
            let Some(region) = face_texture(data, block, side) else {
                continue;
            };

            if def.height < 1.0 {
                let face = MergedFace {
                    block_type,
                    side,
                    origin: p,
                    width: 1,
                    height: 1,
                };
                generate_quad(data, ctx, mesh, &face, region, def.height);
            } else {
                data.plane[u + v * plane_width] = block_type;
            }
        }
    }
}

/// Greedy merge of one filled plane
///
/// Rows are scanned along u; a run grows along u while the block type matches,
/// then grows along v while every cell of the next row matches.
fn build_layer_quads(
    data: &mut MeshBuilderData,
    ctx: &BuildContext,
    mesh: &mut MeshData,
    side: BlockSide,
    layer: i32,
    plane_width: usize,
    plane_height: usize,
) {
    for v in 0..plane_height {
        let mut u = 0;
        while u < plane_width {
            let index = u + v * plane_width;
            let block_type = data.plane[index];
            if block_type.is_air() || data.visited[index] {
                u += 1;
                continue;
            }

            let (width, height) = if ctx.config.greedy {
                find_quad_size(data, u, v, plane_width, plane_height, block_type)
            } else {
                (1, 1)
            };
            debug_assert!(u + width <= plane_width && v + height <= plane_height);

            for dv in 0..height {
                for du in 0..width {
                    data.visited.set(u + du + (v + dv) * plane_width, true);
                }
            }

            let face = MergedFace {
                block_type,
                side,
                origin: plane_coord(side, layer, u, v),
                width: width as u32,
                height: height as u32,
            };
            if let Some(region) = registry_operations::get_side_texture(ctx.registry, block_type, side) {
                generate_quad(data, ctx, mesh, &face, region, 1.0);
            }
            u += width;
        }
    }
}

/// Largest rectangle of `block_type` starting at (u, v)
fn find_quad_size(
    data: &MeshBuilderData,
    u: usize,
    v: usize,
    plane_width: usize,
    plane_height: usize,
    block_type: BlockType,
) -> (usize, usize) {
    let open = |index: usize| data.plane[index] == block_type && !data.visited[index];

    let mut width = 1;
    while u + width < plane_width && open(u + width + v * plane_width) {
        width += 1;
    }

    let mut height = 1;
    'rows: while v + height < plane_height {
        let row = (v + height) * plane_width;
        for du in 0..width {
            if !open(row + u + du) {
                break 'rows;
            }
        }
        height += 1;
    }

    (width, height)
}

/// Emit one solid quad; `top` lowers the face for partial-height blocks
fn generate_quad(
    data: &mut MeshBuilderData,
    ctx: &BuildContext,
    mesh: &mut MeshData,
    face: &MergedFace,
    region: TextureRegion,
    top: f32,
) {
    let side = face.side;
    let (u_axis, v_axis) = side.plane_axes();
    let width = face.width as f32;
    let height = if side.is_vertical() {
        face.height as f32 * top
    } else {
        face.height as f32
    };

    let mut base = ctx.origin;
    for axis in 0..3 {
        base[axis] += face.origin[axis] as f32;
    }

    let quad = corner_order(side).map(|corner| {
        // Light comes from the block under this corner
        let mut block = face.origin;
        if corner[0] > 0.0 {
            block[u_axis] += face.width as i32 - 1;
        }
        if corner[1] > 0.0 {
            block[v_axis] += face.height as i32 - 1;
        }
        let cell = cell_at(ctx.chunk, block);
        let light = chunk_operations::try_get_light_rgb(ctx.chunk, block[0], block[1], block[2])
            .unwrap_or_default();
        let [r, g, b] = vertex_rgb(cell, light);

        SolidVertex {
            position: corner_position(side, base, corner, width, height, face_depth(side, top)),
            color: [r, g, b, side.index() as u8],
            tile_coord: tile_coord(side, corner, width, height),
            tile_base: region.uv_min,
            tile_size: region.uv_size,
            block_coord: [
                ctx.origin[0] + block[0] as f32,
                ctx.origin[1] + block[1] as f32,
                ctx.origin[2] + block[2] as f32,
            ],
        }
    });
    push_quad(&mut mesh.solid_vertices, &mut mesh.solid_indices, quad);

    match data.solid_texture {
        None => data.solid_texture = Some(region.texture),
        Some(bound) if bound != region.texture && !data.mixed_textures_warned => {
            data.mixed_textures_warned = true;
            log::warn!(
                "Chunk ({}, {}, {}) mixes solid textures {} and {}; binding {}",
                ctx.chunk.position.x,
                ctx.chunk.position.y,
                ctx.chunk.position.z,
                bound.0,
                region.texture.0,
                bound.0
            );
        }
        Some(_) => {}
    }
    data.source_faces += (face.width * face.height) as usize;
}

// ============================================================================
// BILLBOARD / ITEM PASS
// ============================================================================

/// North texture, else the first side that has one
fn sprite_texture(data: &mut MeshBuilderData, block: &ResolvedBlock) -> Option<TextureRegion> {
    block.side_textures[BlockSide::North.index()]
        .or_else(|| block.side_textures.iter().flatten().next().copied())
        .or_else(|| {
            warn_missing_texture(data, block.definition.block_type, BlockSide::North);
            None
        })
}

fn for_each_cell<F>(chunk: &ChunkData, mut f: F)
where
    F: FnMut([i32; 3], VoxelCell),
{
    let dims = chunk.dimensions;
    for z in 0..dims.depth as i32 {
        for y in 0..dims.height as i32 {
            for x in 0..dims.width as i32 {
                f([x, y, z], cell_at(chunk, [x, y, z]));
            }
        }
    }
}

fn build_sprites(data: &mut MeshBuilderData, ctx: &BuildContext, mesh: &mut MeshData) {
    for_each_cell(ctx.chunk, |p, cell| {
        if cell.is_air() {
            return;
        }
        let Some(block) = registry_operations::get_block(ctx.registry, cell.block_type()) else {
            return;
        };
        if !block.definition.is_sprite() {
            return;
        }
        let Some(region) = sprite_texture(data, block) else {
            return;
        };
        let e = if block.definition.is_billboard {
            ctx.config.billboard_half_extent
        } else {
            ctx.config.item_half_extent
        };

        let center = [
            ctx.origin[0] + p[0] as f32 + 0.5,
            ctx.origin[1] + p[1] as f32 + 0.5,
            ctx.origin[2] + p[2] as f32 + 0.5,
        ];
        let light = chunk_operations::try_get_light_rgb(ctx.chunk, p[0], p[1], p[2])
            .unwrap_or_default();
        let [r, g, b] = vertex_rgb(cell, light);
        let [u0, v0] = region.uv_min;
        let [u1, v1] = region.uv_max();

        let corners = [
            ([-e, -e], [u0, v1]),
            ([e, -e], [u1, v1]),
            ([e, e], [u1, v0]),
            ([-e, e], [u0, v0]),
        ];
        let quad = corners.map(|(offset, tex_coord)| BillboardVertex {
            position: center,
            color: [r, g, b, 255],
            tex_coord,
            offset,
        });
        push_quad(&mut mesh.billboard_vertices, &mut mesh.billboard_indices, quad);
    });
}

// ============================================================================
// FLUID PASS
// ============================================================================

/// Surface height of a liquid cell in blocks
fn fluid_surface_height(ctx: &BuildContext, def: &BlockDefinition, cell: VoxelCell, p: [i32; 3]) -> f32 {
    if let Adjacent::Cell(above) = adjacent(ctx, p, BlockSide::Top) {
        if above.block_type() == cell.block_type() {
            return 1.0;
        }
    }
    def.height * effective_level(cell) as f32 / MAX_WATER_LEVEL as f32
}

fn build_fluids(data: &mut MeshBuilderData, ctx: &BuildContext, mesh: &mut MeshData) {
    for_each_cell(ctx.chunk, |p, cell| {
        if cell.is_air() {
            return;
        }
        let Some(block) = registry_operations::get_block(ctx.registry, cell.block_type()) else {
            return;
        };
        let def = &block.definition;
        if !def.is_liquid {
            return;
        }

        let surface = fluid_surface_height(ctx, def, cell, p);
        let light = chunk_operations::try_get_light_rgb(ctx.chunk, p[0], p[1], p[2])
            .unwrap_or_default();
        let [r, g, b] = vertex_rgb(cell, light);
        let base = [
            ctx.origin[0] + p[0] as f32,
            ctx.origin[1] + p[1] as f32,
            ctx.origin[2] + p[2] as f32,
        ];

        for side in BlockSide::ALL {
            if !is_face_visible(ctx, def, cell, p, side) {
                continue;
            }
            let Some(region) = face_texture(data, block, side) else {
                continue;
            };
            let height = if side.is_vertical() { surface } else { 1.0 };
            let top = if side == BlockSide::Top { 1.0 } else { 0.0 };

            let quad = corner_order(side).map(|corner| {
                let t = tile_coord(side, corner, 1.0, height);
                FluidVertex {
                    position: corner_position(side, base, corner, 1.0, height, face_depth(side, surface)),
                    color: [r, g, b, 255],
                    tex_coord: [
                        region.uv_min[0] + t[0] * region.uv_size[0],
                        region.uv_min[1] + t[1] * region.uv_size[1],
                    ],
                    direction: side.index() as f32,
                    top,
                }
            });
            push_quad(&mut mesh.fluid_vertices, &mut mesh.fluid_indices, quad);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{TextureLibrary, TextureProvider};
    use crate::world::blocks::basic_blocks::{
        basic_block_definitions, create_default_textures, terrain_tiles, TERRAIN_ATLAS,
    };
    use crate::world::core::ChunkPos;
    use crate::world::storage::{ChunkDimensions, PackedLight};

    fn setup() -> (TextureLibrary, BlockRegistryData) {
        let library = create_default_textures();
        let mut registry = registry_operations::create_block_registry();
        for def in basic_block_definitions() {
            registry_operations::register_block(&mut registry, def, &library).unwrap();
        }
        (library, registry)
    }

    fn empty_policy() -> MesherConfig {
        MesherConfig {
            boundary_policy: BoundaryFacePolicy::Empty,
            ..MesherConfig::default()
        }
    }

    fn chunk(w: u32, h: u32, d: u32) -> ChunkData {
        chunk_operations::create_chunk(ChunkPos::default(), ChunkDimensions::new(w, h, d))
    }

    fn put(chunk: &mut ChunkData, x: i32, y: i32, z: i32, block_type: BlockType) {
        chunk_operations::set_block_type(chunk, x, y, z, block_type).unwrap();
    }

    fn build(chunk: &ChunkData, registry: &BlockRegistryData, config: &MesherConfig) -> MeshData {
        build_chunk_mesh(chunk, &ChunkNeighbors::none(), registry, config)
    }

    fn quads_on(mesh: &MeshData, side: BlockSide) -> Vec<&[SolidVertex]> {
        mesh.solid_vertices()
            .chunks(4)
            .filter(|quad| quad[0].color[3] == side.index() as u8)
            .collect()
    }

    fn tile_extent(quad: &[SolidVertex]) -> [f32; 2] {
        let mut max = [0.0f32; 2];
        for v in quad {
            max[0] = max[0].max(v.tile_coord[0]);
            max[1] = max[1].max(v.tile_coord[1]);
        }
        max
    }

    #[test]
    fn test_empty_chunk_gives_empty_mesh() {
        let (_, registry) = setup();
        let mesh = build(&chunk(4, 4, 4), &registry, &empty_policy());
        assert!(mesh.is_empty());
        assert!(mesh.solid_vertices().is_empty());
        assert_eq!(mesh.solid_texture(), None);
    }

    #[test]
    fn test_single_block_surrounded_by_air() {
        let (library, registry) = setup();
        let mut c = chunk(4, 4, 4);
        put(&mut c, 1, 1, 1, BlockType::STONE);

        let mesh = build(&c, &registry, &MesherConfig::default());
        assert_eq!(mesh.solid_face_count(), 6);
        assert_eq!(mesh.solid_vertices().len(), 24);
        assert_eq!(mesh.solid_indices().len(), 36);
        for side in BlockSide::ALL {
            assert_eq!(quads_on(&mesh, side).len(), 1, "{}", side);
        }
        let terrain = library.atlas(TERRAIN_ATLAS).map(|atlas| atlas.handle);
        assert_eq!(mesh.solid_texture(), terrain);
    }

    #[test]
    fn test_basic_blocks_bind_one_solid_texture() {
        let (library, registry) = setup();
        let mut c = chunk(5, 3, 5);
        put(&mut c, 1, 1, 1, BlockType::STONE);
        put(&mut c, 1, 1, 3, BlockType::GLASS);
        put(&mut c, 3, 1, 1, BlockType::GRASS);
        put(&mut c, 3, 1, 3, BlockType::LEAVES);

        let mut data = create_mesh_builder();
        let mesh = build_chunk_mesh_with(&mut data, &c, &ChunkNeighbors::none(), &registry, &MesherConfig::default());
        assert_eq!(mesh.solid_face_count(), 24);
        assert!(!data.mixed_textures_warned);

        let terrain = library.atlas(TERRAIN_ATLAS).map(|atlas| atlas.handle);
        assert_eq!(mesh.solid_texture(), terrain);
        let glass = library.get_atlas_tile(TERRAIN_ATLAS, terrain_tiles::GLASS).unwrap();
        let glass_quads: Vec<_> = mesh
            .solid_vertices()
            .chunks(4)
            .filter(|quad| quad[0].block_coord[2] == 3.0 && quad[0].block_coord[0] == 1.0)
            .collect();
        assert_eq!(glass_quads.len(), 6);
        for quad in glass_quads {
            assert_eq!(quad[0].tile_base, glass.uv_min);
            assert_eq!(quad[0].tile_size, glass.uv_size);
            assert_ne!(quad[0].tile_size, [1.0, 1.0]);
        }
    }

    #[test]
    fn test_same_type_neighbors_hide_shared_faces() {
        let (_, registry) = setup();
        let mut c = chunk(4, 4, 4);
        put(&mut c, 1, 1, 1, BlockType::STONE);
        put(&mut c, 2, 1, 1, BlockType::STONE);

        let config = MesherConfig {
            greedy: false,
            ..MesherConfig::default()
        };
        let mesh = build(&c, &registry, &config);
        assert_eq!(mesh.solid_face_count(), 10);
        assert_eq!(quads_on(&mesh, BlockSide::East).len(), 1);
        assert_eq!(quads_on(&mesh, BlockSide::West).len(), 1);
    }

    #[test]
    fn test_run_of_four_merges_into_one_quad() {
        let (_, registry) = setup();
        let mut c = chunk(4, 2, 2);
        for x in 0..4 {
            put(&mut c, x, 0, 0, BlockType::DIRT);
        }

        let mesh = build(&c, &registry, &MesherConfig::default());
        let top = quads_on(&mesh, BlockSide::Top);
        assert_eq!(top.len(), 1);
        assert_eq!(tile_extent(top[0]), [4.0, 1.0]);
        // Top and South runs; the other sides touch unloaded chunks or dirt
        assert_eq!(mesh.solid_face_count(), 2);
        assert_eq!(mesh.stats().source_faces, 8);
    }

    #[test]
    fn test_square_merges_into_one_quad() {
        let (_, registry) = setup();
        let mut c = chunk(4, 2, 4);
        for x in 0..2 {
            for z in 0..2 {
                put(&mut c, x, 0, z, BlockType::DIRT);
            }
        }

        let mesh = build(&c, &registry, &MesherConfig::default());
        let top = quads_on(&mesh, BlockSide::Top);
        assert_eq!(top.len(), 1);
        assert_eq!(tile_extent(top[0]), [2.0, 2.0]);
    }

    #[test]
    fn test_different_block_splits_run() {
        let (library, registry) = setup();
        let mut c = chunk(8, 2, 2);
        for x in 0..5 {
            put(&mut c, x, 0, 0, BlockType::DIRT);
        }
        put(&mut c, 2, 0, 0, BlockType::STONE);

        let mesh = build(&c, &registry, &MesherConfig::default());
        let dirt = library
            .get_atlas_tile(TERRAIN_ATLAS, terrain_tiles::DIRT)
            .unwrap();
        let top = quads_on(&mesh, BlockSide::Top);
        let dirt_quads: Vec<_> = top
            .iter()
            .filter(|quad| quad[0].tile_base == dirt.uv_min)
            .collect();
        assert_eq!(top.len(), 3);
        assert_eq!(dirt_quads.len(), 2);
        for quad in dirt_quads {
            assert_eq!(tile_extent(quad), [2.0, 1.0]);
        }
    }

    #[test]
    fn test_merged_quads_tile_instead_of_stretch() {
        let (_, registry) = setup();
        let mut c = chunk(6, 3, 4);
        for x in 0..6 {
            for y in 0..2 {
                for z in 0..3 {
                    put(&mut c, x, y, z, BlockType::GRASS);
                }
            }
        }
        put(&mut c, 3, 1, 1, BlockType::AIR);

        let mesh = build(&c, &registry, &empty_policy());
        assert!(!mesh.is_empty());
        for quad in mesh.solid_vertices().chunks(4) {
            let side = BlockSide::from_index(quad[0].color[3] as usize).unwrap();
            let (u_axis, v_axis) = side.plane_axes();
            let span = |axis: usize| {
                let min = quad.iter().map(|v| v.position[axis]).fold(f32::MAX, f32::min);
                let max = quad.iter().map(|v| v.position[axis]).fold(f32::MIN, f32::max);
                max - min
            };
            let extent = tile_extent(quad);
            assert_eq!(extent, [span(u_axis), span(v_axis)]);
            for v in quad {
                assert!(v.tile_coord[0] == 0.0 || v.tile_coord[0] == extent[0]);
                assert!(v.tile_coord[1] == 0.0 || v.tile_coord[1] == extent[1]);
                assert_eq!(v.tile_base, quad[0].tile_base);
                assert_eq!(v.tile_size, quad[0].tile_size);
            }
        }
    }

    #[test]
    fn test_grass_next_to_air_emits_five_faces() {
        let (_, registry) = setup();
        let mut c = chunk(2, 1, 1);
        put(&mut c, 0, 0, 0, BlockType::GRASS);

        let mut west = chunk_operations::create_chunk(ChunkPos::new(-1, 0, 0), ChunkDimensions::new(2, 1, 1));
        chunk_operations::fill(&mut west, VoxelCell::of(BlockType::STONE));
        let neighbors = ChunkNeighbors::none().with(BlockSide::West, &west);

        let mesh = build_chunk_mesh(&c, &neighbors, &registry, &empty_policy());
        assert_eq!(mesh.solid_face_count(), 5);
        assert_eq!(mesh.solid_indices().len(), 5 * 6);
        assert!(quads_on(&mesh, BlockSide::West).is_empty());
        for side in [
            BlockSide::Top,
            BlockSide::Bottom,
            BlockSide::North,
            BlockSide::South,
            BlockSide::East,
        ] {
            assert_eq!(quads_on(&mesh, side).len(), 1, "{}", side);
        }
    }

    #[test]
    fn test_boundary_policy_for_unloaded_neighbors() {
        let (_, registry) = setup();
        let mut c = chunk(2, 2, 2);
        put(&mut c, 0, 0, 0, BlockType::STONE);

        let opaque = build(&c, &registry, &MesherConfig::default());
        assert_eq!(opaque.solid_face_count(), 3);

        let empty = build(&c, &registry, &empty_policy());
        assert_eq!(empty.solid_face_count(), 6);

        let west = chunk_operations::create_chunk(ChunkPos::new(-1, 0, 0), ChunkDimensions::new(2, 2, 2));
        let neighbors = ChunkNeighbors::none().with(BlockSide::West, &west);
        let loaded = build_chunk_mesh(&c, &neighbors, &registry, &MesherConfig::default());
        assert_eq!(loaded.solid_face_count(), 4);
        assert_eq!(quads_on(&loaded, BlockSide::West).len(), 1);
    }

    #[test]
    fn test_neighbor_chunk_culls_edge_face() {
        let (_, registry) = setup();
        let mut c = chunk(2, 1, 1);
        put(&mut c, 1, 0, 0, BlockType::STONE);
        let mut east = chunk_operations::create_chunk(ChunkPos::new(1, 0, 0), ChunkDimensions::new(2, 1, 1));
        put(&mut east, 0, 0, 0, BlockType::DIRT);

        let neighbors = ChunkNeighbors::none().with(BlockSide::East, &east);
        let mesh = build_chunk_mesh(&c, &neighbors, &registry, &empty_policy());
        assert!(quads_on(&mesh, BlockSide::East).is_empty());
        assert_eq!(mesh.solid_face_count(), 5);
    }

    #[test]
    fn test_transparent_neighbor_rules() {
        let (_, registry) = setup();
        let mut c = chunk(4, 4, 4);
        put(&mut c, 1, 1, 1, BlockType::STONE);
        put(&mut c, 2, 1, 1, BlockType::GLASS);
        put(&mut c, 3, 1, 1, BlockType::GLASS);

        let config = MesherConfig {
            greedy: false,
            ..MesherConfig::default()
        };
        let mesh = build(&c, &registry, &config);
        // Stone shows its face toward the glass, glass hides its face toward the stone
        // and between the two glass blocks; glass at the chunk edge is culled
        assert_eq!(mesh.solid_face_count(), 6 + 4 + 4);
    }

    #[test]
    fn test_unknown_neighbor_never_occludes() {
        let (_, registry) = setup();
        let mut c = chunk(3, 3, 3);
        put(&mut c, 1, 1, 1, BlockType::STONE);
        put(&mut c, 2, 1, 1, BlockType(200));

        let mesh = build(&c, &registry, &MesherConfig::default());
        assert_eq!(quads_on(&mesh, BlockSide::East).len(), 1);
        // The unregistered block itself renders nothing
        assert_eq!(mesh.solid_face_count(), 6);
    }

    #[test]
    fn test_missing_side_texture_skips_face() {
        let (library, mut registry) = setup();
        let def = BlockDefinition::new(BlockType(42), "half_textured").with_side(BlockSide::Top, "water");
        registry_operations::register_block(&mut registry, def, &library).unwrap();

        let mut c = chunk(3, 3, 3);
        put(&mut c, 1, 1, 1, BlockType(42));
        let mut data = create_mesh_builder();
        let mesh = build_chunk_mesh_with(&mut data, &c, &ChunkNeighbors::none(), &registry, &MesherConfig::default());
        assert_eq!(mesh.solid_face_count(), 1);
        assert_eq!(quads_on(&mesh, BlockSide::Top).len(), 1);
        assert_eq!(data.warned.len(), 5);
    }

    #[test]
    fn test_world_space_positions() {
        let (_, registry) = setup();
        let mut c = chunk_operations::create_chunk(ChunkPos::new(1, 0, -1), ChunkDimensions::new(4, 4, 4));
        put(&mut c, 0, 1, 2, BlockType::STONE);

        let mesh = build(&c, &registry, &MesherConfig::default());
        let top = quads_on(&mesh, BlockSide::Top);
        for v in top[0] {
            assert_eq!(v.position[1], 2.0);
            assert!(v.position[0] == 4.0 || v.position[0] == 5.0);
            assert!(v.position[2] == -2.0 || v.position[2] == -1.0);
            assert_eq!(v.block_coord, [4.0, 1.0, -2.0]);
        }
    }

    #[test]
    fn test_vertex_lighting() {
        let (_, registry) = setup();
        let mut c = chunk(3, 3, 3);
        put(&mut c, 1, 1, 1, BlockType::STONE);
        chunk_operations::set_light_level(&mut c, 1, 1, 1, 0).unwrap();
        chunk_operations::set_light_rgb(&mut c, 1, 1, 1, 15, 5, 0).unwrap();

        let mesh = build(&c, &registry, &MesherConfig::default());
        for v in mesh.solid_vertices() {
            assert_eq!(&v.color[..3], &[255, 85, 0]);
        }
        assert_eq!(
            chunk_operations::get_light_rgb(&c, 1, 1, 1).unwrap(),
            PackedLight::new(15, 5, 0)
        );
    }

    #[test]
    fn test_partial_height_block() {
        let (_, registry) = setup();
        let mut c = chunk(4, 4, 4);
        put(&mut c, 1, 1, 1, BlockType::SNOW);
        put(&mut c, 1, 2, 1, BlockType::STONE);
        put(&mut c, 2, 1, 1, BlockType::STONE);

        let config = MesherConfig {
            greedy: false,
            ..MesherConfig::default()
        };
        let mesh = build(&c, &registry, &config);
        let snow_top = quads_on(&mesh, BlockSide::Top)
            .into_iter()
            .find(|quad| quad[0].block_coord == [1.0, 1.0, 1.0])
            .unwrap();
        assert!(snow_top.iter().all(|v| v.position[1] == 1.125));

        // Snow does not hide the stone faces touching it
        let stone_west = quads_on(&mesh, BlockSide::West)
            .into_iter()
            .any(|quad| quad[0].block_coord == [2.0, 1.0, 1.0]);
        assert!(stone_west);
        let stone_bottom = quads_on(&mesh, BlockSide::Bottom)
            .into_iter()
            .any(|quad| quad[0].block_coord == [1.0, 2.0, 1.0]);
        assert!(stone_bottom);
    }

    #[test]
    fn test_single_liquid_cell() {
        let (_, registry) = setup();
        let mut c = chunk(3, 3, 3);
        put(&mut c, 1, 1, 1, BlockType::WATER);

        let mesh = build(&c, &registry, &MesherConfig::default());
        assert_eq!(mesh.solid_face_count(), 0);
        assert_eq!(mesh.fluid_face_count(), 6);

        let tops: Vec<_> = mesh.fluid_vertices().iter().filter(|v| v.top == 1.0).collect();
        assert_eq!(tops.len(), 4);
        for v in tops {
            assert_eq!(v.position[1], 1.875);
            assert_eq!(v.direction, BlockSide::Top.index() as f32);
        }
    }

    #[test]
    fn test_adjacent_liquid_levels() {
        let (_, registry) = setup();
        let mut c = chunk(4, 3, 3);
        put(&mut c, 1, 1, 1, BlockType::WATER);
        put(&mut c, 2, 1, 1, BlockType::WATER);
        chunk_operations::set_water_level(&mut c, 2, 1, 1, 3).unwrap();

        let mesh = build(&c, &registry, &MesherConfig::default());
        // The full cell shows its side above the lower neighbor, not the reverse
        assert_eq!(mesh.fluid_face_count(), 11);
    }

    #[test]
    fn test_stacked_liquid_hides_shared_faces() {
        let (_, registry) = setup();
        let mut c = chunk(3, 4, 3);
        put(&mut c, 1, 1, 1, BlockType::WATER);
        put(&mut c, 1, 2, 1, BlockType::WATER);
        chunk_operations::set_water_level(&mut c, 1, 1, 1, 7).unwrap();
        chunk_operations::set_water_level(&mut c, 1, 2, 1, 2).unwrap();

        let mesh = build(&c, &registry, &MesherConfig::default());
        assert_eq!(mesh.fluid_face_count(), 10);
        let tops: Vec<_> = mesh
            .fluid_vertices()
            .chunks(4)
            .filter(|quad| quad[0].top == 1.0)
            .collect();
        assert_eq!(tops.len(), 1);
        // Only the upper, shallow cell shows a surface: 2 + 0.875 * 2 / 7
        assert!(tops[0].iter().all(|v| (v.position[1] - 2.25).abs() < 1e-5));
    }

    #[test]
    fn test_liquid_against_opaque_block() {
        let (_, registry) = setup();
        let mut c = chunk(3, 3, 3);
        put(&mut c, 1, 1, 1, BlockType::WATER);
        put(&mut c, 1, 0, 1, BlockType::STONE);

        let mesh = build(&c, &registry, &MesherConfig::default());
        assert_eq!(mesh.fluid_face_count(), 5);
        // Stone shows its top under the water
        assert_eq!(quads_on(&mesh, BlockSide::Top).len(), 1);
    }

    #[test]
    fn test_billboards_and_items() {
        let (_, registry) = setup();
        let mut c = chunk(4, 4, 4);
        put(&mut c, 1, 1, 1, BlockType::TALL_GRASS);
        put(&mut c, 2, 1, 1, BlockType::STONE);
        put(&mut c, 1, 1, 2, BlockType::FLOWER);

        let mesh = build(&c, &registry, &MesherConfig::default());
        assert_eq!(mesh.billboard_count(), 2);
        assert_eq!(mesh.billboard_indices(), &[0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);

        let grass = &mesh.billboard_vertices()[..4];
        assert!(grass.iter().all(|v| v.position == [1.5, 1.5, 1.5]));
        assert_eq!(grass[2].offset, [0.5, 0.5]);

        let flower = &mesh.billboard_vertices()[4..];
        assert!(flower.iter().all(|v| v.position == [1.5, 1.5, 2.5]));
        assert_eq!(flower[0].offset, [-0.25, -0.25]);

        // Sprites never cull their neighbors
        assert_eq!(mesh.solid_face_count(), 6);
    }

    #[test]
    fn test_scratch_reuse_gives_identical_meshes() {
        let (_, registry) = setup();
        let mut c = chunk(8, 8, 8);
        for i in 0..8 {
            put(&mut c, i, i, 7 - i, BlockType::BRICK);
            put(&mut c, i, 0, i, BlockType::SAND);
        }
        let mut data = create_mesh_builder();
        let config = MesherConfig::default();
        let first = build_chunk_mesh_with(&mut data, &c, &ChunkNeighbors::none(), &registry, &config);
        let second = build_chunk_mesh_with(&mut data, &c, &ChunkNeighbors::none(), &registry, &config);
        assert_eq!(first.solid_vertices(), second.solid_vertices());
        assert_eq!(first.solid_indices(), second.solid_indices());
    }
}
