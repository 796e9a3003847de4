use glam::DVec3;
use regi_lie::se3::SE3;

use crate::CameraModel;

/// Applies rigid offsets about an anchor point expressed in the camera's projective frame.
///
/// A raw offset `O` is defined about the origin of the camera projective frame. To rotate
/// about the anchor instead, the world frame is first moved into the projective frame and
/// shifted so that the anchor sits at the origin, `O` is applied there, and the shift and
/// extrinsics are undone before mapping into the volume:
///
/// `cam_extrins_to_vol = gt * E^-1 * shift_from_anchor * O * shift_to_anchor * E`
///
/// Everything except `O` depends only on the ground truth, so it is computed once.
#[derive(Debug, Clone)]
pub struct FrameCenteredComposer {
    anchor_wrt_cam: DVec3,
    extrins_to_anchor: SE3,
    anchor_to_vol: SE3,
}

impl FrameCenteredComposer {
    /// Build the composer.
    ///
    /// # Arguments
    ///
    /// * `gt_cam_extrins_to_vol` - Ground-truth pose from the camera extrinsic frame to the volume.
    /// * `camera` - The camera model, whose extrinsics define the projective frame.
    /// * `anchor_wrt_vol` - The anchor point (volume centroid) in volume coordinates.
    pub fn new(gt_cam_extrins_to_vol: &SE3, camera: &CameraModel, anchor_wrt_vol: DVec3) -> Self {
        let anchor_wrt_cam = camera
            .extrinsic()
            .transform_point(gt_cam_extrins_to_vol.inverse().transform_point(anchor_wrt_vol));

        let shift_to_anchor = SE3::from_translation(-anchor_wrt_cam);
        let shift_from_anchor = SE3::from_translation(anchor_wrt_cam);

        let extrins_to_anchor = shift_to_anchor * camera.extrinsic();
        let anchor_to_vol = *gt_cam_extrins_to_vol * camera.extrinsic_inv() * shift_from_anchor;

        log::debug!("center of rot wrt vol: {:?}", anchor_wrt_vol);
        log::debug!("center of rot wrt cam proj frame: {:?}", anchor_wrt_cam);

        Self {
            anchor_wrt_cam,
            extrins_to_anchor,
            anchor_to_vol,
        }
    }

    /// The anchor point in the camera projective frame.
    pub fn anchor_wrt_cam(&self) -> DVec3 {
        self.anchor_wrt_cam
    }

    /// Camera extrinsic frame to the anchor-centred projective frame.
    pub fn extrins_to_anchor(&self) -> SE3 {
        self.extrins_to_anchor
    }

    /// Anchor-centred projective frame to the volume.
    pub fn anchor_to_vol(&self) -> SE3 {
        self.anchor_to_vol
    }

    /// The perturbed camera-extrinsics-to-volume pose for a raw offset.
    ///
    /// An identity offset reproduces the ground-truth pose.
    pub fn compose(&self, offset: &SE3) -> SE3 {
        self.anchor_to_vol * *offset * self.extrins_to_anchor
    }
}
