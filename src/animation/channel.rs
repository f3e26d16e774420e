use glam::{Quat, Vec4};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::animation::values::{ChannelCurve, ChannelValue, RotationBlend, VectorBlend};
use crate::errors::{KinemaError, Result};
use crate::math;

/// Maximum number of scalar components a channel can animate.
pub const MAX_COMPONENTS: usize = 4;

/// One timestamped sample of a single component.
///
/// Slopes are the Hermite tangents used by cubic blending.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Keyframe {
    pub frame: f32,
    pub value: f32,
    pub in_slope: f32,
    pub out_slope: f32,
}

impl Keyframe {
    #[must_use]
    pub const fn new(frame: f32, value: f32, in_slope: f32, out_slope: f32) -> Self {
        Self {
            frame,
            value,
            in_slope,
            out_slope,
        }
    }

    /// A keyframe with flat tangents.
    #[must_use]
    pub const fn flat(frame: f32, value: f32) -> Self {
        Self::new(frame, value, 0.0, 0.0)
    }

    fn is_finite(&self) -> bool {
        self.frame.is_finite()
            && self.value.is_finite()
            && self.in_slope.is_finite()
            && self.out_slope.is_finite()
    }
}

impl From<[f32; 4]> for Keyframe {
    fn from([frame, value, in_slope, out_slope]: [f32; 4]) -> Self {
        Self::new(frame, value, in_slope, out_slope)
    }
}

impl From<Keyframe> for [f32; 4] {
    fn from(k: Keyframe) -> Self {
        [k.frame, k.value, k.in_slope, k.out_slope]
    }
}

/// Location of one component's keyframes inside the channel's shared buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpan {
    pub offset: usize,
    pub count: usize,
}

/// The pair of keyframes surrounding a queried frame.
///
/// Both ends refer to the same keyframe when the frame lies on or outside the
/// keyed range (or exactly on a key).
#[derive(Debug, Clone, Copy)]
pub struct Bracket<'a> {
    pub low: &'a Keyframe,
    pub high: &'a Keyframe,
}

impl Bracket<'_> {
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        std::ptr::eq(self.low, self.high)
    }

    /// Blend parameter of `frame` between the two ends, `None` when degenerate.
    ///
    /// Not clamped: the bracket search already keeps `frame` between the ends.
    #[inline]
    #[must_use]
    pub fn blend_factor(&self, frame: f32) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }
        Some((frame - self.low.frame) / (self.high.frame - self.low.frame))
    }
}

/// A single animated curve of up to four scalar components.
///
/// All components share one contiguous keyframe buffer; `spans` records where
/// each component's sorted run starts and how long it is.
#[derive(Debug, Clone)]
pub struct KeyframeChannel {
    name: String,
    subname: String,
    curve: ChannelCurve,
    spans: SmallVec<[KeySpan; MAX_COMPONENTS]>,
    keys: Vec<Keyframe>,
}

impl KeyframeChannel {
    /// Builds a channel from per-component keyframe runs.
    ///
    /// Fails if there are no components, more components than the value kind
    /// has lanes, or a component that is empty, unsorted or not finite.
    pub fn new<I>(
        name: impl Into<String>,
        subname: impl Into<String>,
        curve: ChannelCurve,
        components: I,
    ) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<[Keyframe]>,
    {
        let name = name.into();
        let runs: SmallVec<[I::Item; MAX_COMPONENTS]> = components.into_iter().collect();

        if runs.is_empty() {
            return Err(KinemaError::EmptyChannel { channel: name });
        }
        let max = curve.value_kind().max_components();
        if runs.len() > max {
            return Err(KinemaError::TooManyComponents {
                channel: name,
                count: runs.len(),
                max,
            });
        }

        let mut spans = SmallVec::new();
        let mut keys = Vec::with_capacity(runs.iter().map(|r| r.as_ref().len()).sum());
        for (component, run) in runs.iter().enumerate() {
            let run = run.as_ref();
            validate_run(&name, component, run)?;
            spans.push(KeySpan {
                offset: keys.len(),
                count: run.len(),
            });
            keys.extend_from_slice(run);
        }

        Ok(Self {
            name,
            subname: subname.into(),
            curve,
            spans,
            keys,
        })
    }

    /// Target joint name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target transform field, e.g. `"t"` or `"r"`.
    #[inline]
    #[must_use]
    pub fn subname(&self) -> &str {
        &self.subname
    }

    #[inline]
    #[must_use]
    pub fn curve(&self) -> ChannelCurve {
        self.curve
    }

    #[inline]
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    #[must_use]
    pub fn spans(&self) -> &[KeySpan] {
        &self.spans
    }

    /// Sorted keyframes of one component. Panics if `component` is out of range.
    #[inline]
    #[must_use]
    pub fn keyframes(&self, component: usize) -> &[Keyframe] {
        let span = self.spans[component];
        &self.keys[span.offset..span.offset + span.count]
    }

    /// Earliest keyed frame over all components.
    #[must_use]
    pub fn first_frame(&self) -> f32 {
        (0..self.component_count())
            .map(|c| self.keyframes(c)[0].frame)
            .fold(f32::INFINITY, f32::min)
    }

    /// Latest keyed frame over all components.
    #[must_use]
    pub fn last_frame(&self) -> f32 {
        (0..self.component_count())
            .filter_map(|c| self.keyframes(c).last().map(|k| k.frame))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Binary search for the keyframes around `frame` in one component.
    ///
    /// At or before the first key both ends are the first key; at or after the
    /// last key both ends are the last key. Otherwise `low.frame < frame <
    /// high.frame` for an adjacent pair, and a frame landing exactly on an
    /// interior key yields that key alone.
    #[must_use]
    pub fn find_bracket(&self, component: usize, frame: f32) -> Bracket<'_> {
        let keys = self.keyframes(component);

        let mut first = 0;
        let mut last = keys.len() - 1;
        while last - first > 1 {
            let mid = first + (last - first) / 2;
            if keys[mid].frame < frame {
                first = mid;
            } else {
                last = mid;
            }
        }

        let (low, high) = if frame <= keys[first].frame {
            (first, first)
        } else if frame < keys[last].frame {
            (first, last)
        } else {
            (last, last)
        };

        Bracket {
            low: &keys[low],
            high: &keys[high],
        }
    }

    /// Samples the channel at `frame` starting from the channel's rest value.
    ///
    /// Lanes not covered by a component read as zero (identity for quaternion
    /// channels).
    #[must_use]
    pub fn sample(&self, frame: f32) -> ChannelValue {
        self.sample_lanes(self.rest_lanes(), frame)
    }

    /// Samples the channel at `frame`, keeping `current` in every lane the
    /// channel does not animate.
    ///
    /// For Euler channels a rotation in `current` is first expressed as angles
    /// in the channel's rotation order.
    #[must_use]
    pub fn sample_over(&self, current: ChannelValue, frame: f32) -> ChannelValue {
        let base = match (self.curve, current) {
            (ChannelCurve::Vector(_), ChannelValue::Vector(v)) => v.extend(0.0),
            (ChannelCurve::Euler { order, .. }, ChannelValue::Rotation(q)) => {
                math::quat_to_euler(q, order).extend(0.0)
            }
            (ChannelCurve::Quaternion(_), ChannelValue::Rotation(q)) => Vec4::from(q),
            _ => self.rest_lanes(),
        };
        self.sample_lanes(base, frame)
    }

    fn rest_lanes(&self) -> Vec4 {
        match self.curve {
            ChannelCurve::Quaternion(_) => Vec4::from(Quat::IDENTITY),
            _ => Vec4::ZERO,
        }
    }

    fn sample_lanes(&self, base: Vec4, frame: f32) -> ChannelValue {
        let mut a = base;
        let mut b = base;
        let mut left = Vec4::ZERO;
        let mut right = Vec4::ZERO;
        let mut t = Vec4::ZERO;
        let mut shared_t = None;

        for component in 0..self.component_count() {
            let bracket = self.find_bracket(component, frame);
            a[component] = bracket.low.value;
            b[component] = bracket.high.value;
            left[component] = bracket.low.out_slope;
            right[component] = bracket.high.in_slope;

            if let Some(factor) = bracket.blend_factor(frame) {
                t[component] = factor;
                shared_t.get_or_insert(factor);
            }
        }

        let Some(shared_t) = shared_t else {
            return self.hold(a);
        };

        match self.curve {
            ChannelCurve::Vector(blend) => {
                ChannelValue::Vector(blend_lanes(blend, a, left, b, right, t).truncate())
            }
            ChannelCurve::Euler { blend, order } => {
                let qa = Vec4::from(math::euler_to_quat(a.truncate(), order));
                let qb = Vec4::from(math::euler_to_quat(b.truncate(), order));
                let lanes = blend_lanes(blend, qa, left, qb, right, Vec4::splat(shared_t));
                ChannelValue::rotation_from_lanes(lanes)
            }
            ChannelCurve::Quaternion(blend) => {
                let t = Vec4::splat(shared_t);
                match blend {
                    RotationBlend::Constant => ChannelValue::Rotation(Quat::from_vec4(a)),
                    RotationBlend::Linear => ChannelValue::rotation_from_lanes(math::lerp(a, b, t)),
                    RotationBlend::Cubic => {
                        ChannelValue::rotation_from_lanes(math::hermite(a, left, b, right, t))
                    }
                    RotationBlend::Spherical => ChannelValue::Rotation(math::slerp(
                        math::quat_from_lanes(a),
                        math::quat_from_lanes(b),
                        shared_t,
                    )),
                }
            }
        }
    }

    /// Result when every component sits on a single key: no blending at all.
    fn hold(&self, a: Vec4) -> ChannelValue {
        match self.curve {
            ChannelCurve::Vector(_) => ChannelValue::Vector(a.truncate()),
            ChannelCurve::Euler { order, .. } => {
                ChannelValue::Rotation(math::euler_to_quat(a.truncate(), order))
            }
            ChannelCurve::Quaternion(_) => ChannelValue::Rotation(Quat::from_vec4(a)),
        }
    }
}

fn blend_lanes(blend: VectorBlend, a: Vec4, left: Vec4, b: Vec4, right: Vec4, t: Vec4) -> Vec4 {
    match blend {
        VectorBlend::Constant => a,
        VectorBlend::Linear => math::lerp(a, b, t),
        VectorBlend::Cubic => math::hermite(a, left, b, right, t),
    }
}

fn validate_run(channel: &str, component: usize, run: &[Keyframe]) -> Result<()> {
    if run.is_empty() {
        return Err(KinemaError::EmptyComponent {
            channel: channel.to_string(),
            component,
        });
    }
    for (index, key) in run.iter().enumerate() {
        if !key.is_finite() {
            return Err(KinemaError::NonFiniteKeyframe {
                channel: channel.to_string(),
                component,
                index,
            });
        }
        if index > 0 && key.frame < run[index - 1].frame {
            return Err(KinemaError::UnsortedKeyframes {
                channel: channel.to_string(),
                component,
                index,
            });
        }
    }
    Ok(())
}
