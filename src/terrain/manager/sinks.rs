// ============================================
// Sinks - Получатели готовых чанков
// ============================================
//
// Рендер и физика живут снаружи. Хранилище вызывает их только из
// потока-потребителя, ответа не ждёт.

use std::sync::Arc;

use ultraviolet::Vec2;

use crate::terrain::cache::ChunkCoord;
use crate::terrain::mesh::MeshData;
use crate::texture::TerrainTexture;

pub trait RenderSink {
    /// Текстура чанка (после прихода карты)
    fn install_texture(&mut self, coord: ChunkCoord, texture: TerrainTexture);
    /// Новый активный меш чанка
    fn install_mesh(&mut self, coord: ChunkCoord, mesh: Arc<MeshData>);
    fn set_visible(&mut self, coord: ChunkCoord, visible: bool);
}

pub trait CollisionSink {
    /// Установить коллайдер. Для каждого чанка вызывается не больше одного раза.
    fn install_collider(&mut self, coord: ChunkCoord, center: Vec2, mesh: Arc<MeshData>);
}

impl RenderSink for () {
    fn install_texture(&mut self, _coord: ChunkCoord, _texture: TerrainTexture) {}
    fn install_mesh(&mut self, _coord: ChunkCoord, _mesh: Arc<MeshData>) {}
    fn set_visible(&mut self, _coord: ChunkCoord, _visible: bool) {}
}

impl CollisionSink for () {
    fn install_collider(&mut self, _coord: ChunkCoord, _center: Vec2, _mesh: Arc<MeshData>) {}
}
