// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end playback of display lists into the reference canvas.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use kurbo::{Cap, Point, Rect, Shape};
use peniko::Color;
use stipple_canvas::{
    BlendMode, Canvas, ClipOperation, ColorSource, FillRule, Matrix, Paint, PaintStyle, PointStyle,
    RuntimeStage, Texture, TextureId, VertexMode,
};
use stipple_canvas_ref::{DrawOp, Event, RefCanvas, RefPicture, StateOp};
use stipple_display_list::{
    DisplayList, DisplayListBuilder, DlAtlas, DlBlendMode, DlClipOp, DlColor, DlColorSource,
    DlDrawStyle, DlFilterMode, DlFont, DlGlyph, DlGlyphRun, DlGradientStops, DlIRect, DlImage,
    DlImageColorSource, DlImageFilter, DlImageSampling, DlLinearGradient, DlMaskFilter, DlMatrix,
    DlOpReceiver, DlPath, DlPathEffect, DlPoint, DlPointMode, DlRRect, DlRSTransform, DlRect,
    DlRuntimeEffect, DlStrokeCap, DlTextBlob, DlTileMode, DlVertexMode, DlVertices,
    SaveLayerOptions,
};
use stipple_dispatch::{
    Dispatcher, shadow_mask_blur, spot_color, to_blend_mode, to_color,
    to_filter_sampler_descriptor, to_sampler_descriptor,
};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

fn play_on(canvas: RefCanvas, list: &DisplayList) -> RefPicture {
    let mut dispatcher = Dispatcher::new(canvas);
    list.dispatch(&mut dispatcher);
    dispatcher.end_recording_as_picture()
}

fn play(list: &DisplayList) -> RefPicture {
    play_on(RefCanvas::new(), list)
}

fn record(f: impl FnOnce(&mut DisplayListBuilder)) -> DisplayList {
    let mut builder = DisplayListBuilder::new();
    f(&mut builder);
    builder.build()
}

fn draws(picture: &RefPicture) -> Vec<&DrawOp> {
    picture.draws().collect()
}

fn state_ops(picture: &RefPicture) -> Vec<&StateOp> {
    picture
        .events
        .iter()
        .filter_map(|event| match event {
            Event::State { op, .. } => Some(op),
            Event::Draw { .. } => None,
        })
        .collect()
}

fn texture(width: u32, height: u32) -> Arc<Texture> {
    Arc::new(Texture::new(TextureId(7), width, height))
}

fn rect(l: f32, t: f32, r: f32, b: f32) -> DlRect {
    DlRect::from_ltrb(l, t, r, b)
}

#[test]
fn solid_rect_uses_current_color() {
    let list = record(|b| {
        b.set_color(DlColor::RED);
        b.draw_rect(&rect(0.0, 0.0, 10.0, 10.0));
    });
    let picture = play(&list);
    let draws = draws(&picture);
    assert_eq!(draws.len(), 1);
    assert_eq!(
        draws[0],
        &DrawOp::Rect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            paint: Paint::with_color(to_color(DlColor::RED)),
        }
    );
}

#[test]
fn save_translate_restore() {
    let list = record(|b| {
        b.save();
        b.translate(10.0, 20.0);
        b.draw_circle(DlPoint::new(0.0, 0.0), 5.0);
        b.restore();
    });
    let picture = play(&list);
    let events = &picture.events;
    assert_eq!(events.len(), 4);

    let Event::Draw { op, state } = &events[2] else {
        panic!("expected the circle draw, got {:?}", events[2]);
    };
    assert!(matches!(op, DrawOp::Circle { center, radius, .. }
        if *center == Point::ZERO && *radius == 5.0));
    assert_eq!(state.transform, Matrix::translation(10.0, 20.0, 0.0));
    assert_eq!(state.save_count, 2);

    assert_eq!(
        state_ops(&picture),
        [
            &StateOp::Save,
            &StateOp::Concat(Matrix::translation(10.0, 20.0, 0.0)),
            &StateOp::Restore,
        ]
    );
    assert_eq!(events[3].state().save_count, 1);
}

#[test]
fn affine_transform_is_transposed() {
    let list = record(|b| b.transform_2d_affine(2.0, 0.0, 5.0, 0.0, 3.0, 7.0));
    let picture = play(&list);
    #[rustfmt::skip]
    let expected = Matrix::new([
        2.0, 0.0, 0.0, 0.0,
        0.0, 3.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        5.0, 7.0, 0.0, 1.0,
    ]);
    assert_eq!(state_ops(&picture), [&StateOp::Concat(expected)]);
}

#[test]
fn top_level_reset_returns_to_identity() {
    let list = record(|b| {
        b.translate(4.0, 4.0);
        b.transform_reset();
        b.draw_paint();
    });
    let picture = play(&list);
    let last = picture.events.last().expect("a draw");
    assert!(last.state().transform.is_identity());
}

#[test]
fn nested_list_is_sandboxed_and_faded() {
    let child = record(|b| {
        b.set_color(DlColor::BLUE);
        b.translate(5.0, 5.0);
        b.draw_rect(&rect(0.0, 0.0, 1.0, 1.0));
    });
    let parent = record(|b| {
        b.set_color(DlColor::RED);
        b.draw_display_list(&child, 0.5);
        b.draw_rect(&rect(0.0, 0.0, 2.0, 2.0));
    });
    let picture = play(&parent);

    assert_eq!(
        state_ops(&picture),
        [
            &StateOp::Save,
            &StateOp::SaveLayer {
                paint: Paint::with_color(Color::new([0.0, 0.0, 0.0, 0.5])),
                bounds: None,
                backdrop: None,
            },
            &StateOp::Concat(Matrix::translation(5.0, 5.0, 0.0)),
            &StateOp::Restore,
            &StateOp::Restore,
        ]
    );

    let draws: Vec<_> = picture
        .events
        .iter()
        .filter_map(|event| match event {
            Event::Draw { op, state } => Some((op, state)),
            Event::State { .. } => None,
        })
        .collect();
    assert_eq!(draws.len(), 2);

    // The nested list starts from a default paint.
    let (inner, inner_state) = draws[0];
    assert_eq!(inner.paint(), &Paint::with_color(to_color(DlColor::BLUE)));
    assert_eq!(inner_state.transform, Matrix::translation(5.0, 5.0, 0.0));
    assert_eq!(inner_state.save_count, 3);

    // The outer paint and transform survive it.
    let (outer, outer_state) = draws[1];
    assert_eq!(outer.paint(), &Paint::with_color(to_color(DlColor::RED)));
    assert!(outer_state.transform.is_identity());
    assert_eq!(outer_state.save_count, 1);
}

#[test]
fn opaque_nested_list_skips_the_layer() {
    let child = record(|b| b.draw_paint());
    let parent = record(|b| b.draw_display_list(&child, 1.0));
    let picture = play(&parent);
    assert!(
        !state_ops(&picture)
            .iter()
            .any(|op| matches!(op, StateOp::SaveLayer { .. }))
    );
    assert_eq!(picture.draws().count(), 1);
}

#[test]
fn unbalanced_nested_saves_are_unwound() {
    let child = record(|b| {
        b.save();
        b.save();
        b.clip_rect(&rect(0.0, 0.0, 5.0, 5.0), DlClipOp::Intersect, false);
        b.scale(3.0, 3.0);
    });
    let parent = record(|b| {
        b.draw_display_list(&child, 1.0);
        b.draw_rect(&rect(0.0, 0.0, 1.0, 1.0));
    });
    let mut dispatcher = Dispatcher::new(RefCanvas::new());
    parent.dispatch(&mut dispatcher);
    assert_eq!(dispatcher.canvas().save_count(), 1);
    assert!(dispatcher.initial_matrix().is_identity());

    let picture = dispatcher.end_recording_as_picture();
    let last = picture.events.last().expect("a draw");
    assert!(last.state().transform.is_identity());
    assert_eq!(last.state().cull_rect, None);
}

#[test]
fn nested_reset_returns_to_embedding_transform() {
    let child = record(|b| {
        b.translate(3.0, 0.0);
        b.transform_reset();
        b.draw_rect(&rect(0.0, 0.0, 1.0, 1.0));
    });
    let parent = record(|b| {
        b.translate(10.0, 0.0);
        b.draw_display_list(&child, 1.0);
    });
    let picture = play(&parent);
    let draw = picture
        .events
        .iter()
        .find(|event| event.as_draw().is_some())
        .expect("a draw");
    assert_eq!(draw.state().transform, Matrix::translation(10.0, 0.0, 0.0));
}

#[test]
fn doubly_nested_lists_are_sandboxed_at_each_level() {
    let grandchild = record(|b| {
        b.set_color(DlColor::GREEN);
        b.translate(3.0, 0.0);
        b.save();
        b.draw_rect(&rect(0.0, 0.0, 1.0, 1.0));
    });
    let child = record(|b| {
        b.set_color(DlColor::BLUE);
        b.translate(5.0, 5.0);
        b.draw_display_list(&grandchild, 0.5);
        b.draw_rect(&rect(0.0, 0.0, 2.0, 2.0));
    });
    let parent = record(|b| {
        b.set_color(DlColor::RED);
        b.translate(1.0, 1.0);
        b.draw_display_list(&child, 0.25);
        b.draw_rect(&rect(0.0, 0.0, 3.0, 3.0));
    });
    let mut dispatcher = Dispatcher::new(RefCanvas::new());
    parent.dispatch(&mut dispatcher);

    assert_eq!(dispatcher.paint(), &Paint::with_color(to_color(DlColor::RED)));
    assert!(dispatcher.initial_matrix().is_identity());
    assert_eq!(dispatcher.canvas().save_count(), 1);
    assert_eq!(dispatcher.canvas().current_transform(), Matrix::translation(1.0, 1.0, 0.0));

    let picture = dispatcher.end_recording_as_picture();
    let draws: Vec<_> = picture
        .events
        .iter()
        .filter_map(|event| event.as_draw().map(|op| (op, event.state())))
        .collect();
    assert_eq!(draws.len(), 3);

    let (grandchild_draw, grandchild_state) = draws[0];
    assert_eq!(grandchild_draw.paint(), &Paint::with_color(to_color(DlColor::GREEN)));
    assert_eq!(grandchild_state.transform, Matrix::translation(9.0, 6.0, 0.0));

    // The child resumes with its own paint, transform and depth.
    let (child_draw, child_state) = draws[1];
    assert_eq!(child_draw.paint(), &Paint::with_color(to_color(DlColor::BLUE)));
    assert_eq!(child_state.transform, Matrix::translation(6.0, 6.0, 0.0));
    assert_eq!(child_state.save_count, 3);

    let (parent_draw, parent_state) = draws[2];
    assert_eq!(parent_draw.paint(), &Paint::with_color(to_color(DlColor::RED)));
    assert_eq!(parent_state.transform, Matrix::translation(1.0, 1.0, 0.0));
    assert_eq!(parent_state.save_count, 1);
}

fn two_far_apart_rects() -> DisplayList {
    let mut builder = DisplayListBuilder::with_rtree();
    builder.set_color(DlColor::GREEN);
    builder.draw_rect(&rect(0.0, 0.0, 10.0, 10.0));
    builder.draw_rect(&rect(200.0, 200.0, 210.0, 210.0));
    builder.build()
}

#[test]
fn nested_playback_culls_with_an_rtree() {
    let child = two_far_apart_rects();
    let parent = record(|b| b.draw_display_list(&child, 1.0));
    let picture = play_on(
        RefCanvas::with_cull_rect(Rect::new(0.0, 0.0, 50.0, 50.0)),
        &parent,
    );
    let draws = draws(&picture);
    assert_eq!(draws.len(), 1);
    assert!(matches!(draws[0], DrawOp::Rect { rect, paint }
        if *rect == Rect::new(0.0, 0.0, 10.0, 10.0)
            && *paint == Paint::with_color(to_color(DlColor::GREEN))));
}

#[test]
fn nested_playback_without_cull_rect_draws_everything() {
    let child = two_far_apart_rects();
    let parent = record(|b| b.draw_display_list(&child, 1.0));
    assert_eq!(play(&parent).draws().count(), 2);
}

#[test]
fn perspective_disables_culling() {
    let child = two_far_apart_rects();
    let parent = record(|b| {
        b.transform_full_perspective(
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.001, 0.0, 0.0, 1.0,
        );
        b.draw_display_list(&child, 1.0);
    });
    let picture = play_on(
        RefCanvas::with_cull_rect(Rect::new(0.0, 0.0, 50.0, 50.0)),
        &parent,
    );
    assert_eq!(picture.draws().count(), 2);
}

#[test]
fn culling_keeps_shadows_whose_blur_reaches_the_cull_rect() {
    let mut builder = DisplayListBuilder::with_rtree();
    builder.draw_shadow(
        &DlPath::rect(rect(0.0, 0.0, 10.0, 10.0)),
        DlColor::BLACK,
        10.0,
        false,
        1.0,
    );
    let child = builder.build();
    let parent = record(|b| b.draw_display_list(&child, 1.0));

    // The blur reaches about x = 28.8.
    let picture = play_on(
        RefCanvas::with_cull_rect(Rect::new(22.0, 0.0, 60.0, 60.0)),
        &parent,
    );
    assert_eq!(picture.draws().count(), 1);

    let far = play_on(
        RefCanvas::with_cull_rect(Rect::new(40.0, 0.0, 60.0, 60.0)),
        &parent,
    );
    assert_eq!(far.draws().count(), 0);
}

#[test]
fn culling_keeps_content_of_filtered_layers() {
    let blur = DlImageFilter::Blur {
        sigma_x: 10.0,
        sigma_y: 10.0,
        tile_mode: DlTileMode::Decal,
    };
    let mut builder = DisplayListBuilder::with_rtree();
    builder.set_image_filter(Some(&blur));
    builder.save_layer(None, SaveLayerOptions::WITH_ATTRIBUTES, None);
    builder.set_image_filter(None);
    builder.draw_rect(&rect(0.0, 0.0, 10.0, 10.0));
    builder.restore();
    let child = builder.build();
    let parent = record(|b| b.draw_display_list(&child, 1.0));

    let picture = play_on(
        RefCanvas::with_cull_rect(Rect::new(22.0, 0.0, 60.0, 60.0)),
        &parent,
    );
    let draws = draws(&picture);
    assert_eq!(draws.len(), 1);
    assert!(matches!(draws[0], DrawOp::Rect { rect, .. }
        if *rect == Rect::new(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn stroke_and_fill_keeps_previous_style() {
    let list = record(|b| {
        b.set_draw_style(DlDrawStyle::Stroke);
        b.set_draw_style(DlDrawStyle::StrokeAndFill);
        b.draw_rect(&rect(0.0, 0.0, 1.0, 1.0));
    });
    let picture = play(&list);
    assert_eq!(draws(&picture)[0].paint().style, PaintStyle::Stroke);
}

#[test]
fn paint_attributes_reach_draws() {
    let list = record(|b| {
        b.set_mask_filter(Some(&DlMaskFilter::Blur {
            style: stipple_display_list::DlBlurStyle::Outer,
            sigma: 3.0,
        }));
        b.set_image_filter(Some(&DlImageFilter::Blur {
            sigma_x: 1.0,
            sigma_y: 1.0,
            tile_mode: DlTileMode::Decal,
        }));
        b.set_blend_mode(DlBlendMode::Multiply);
        b.set_dither(true);
        b.draw_paint();
        b.set_image_filter(None);
        b.set_mask_filter(None);
        b.draw_paint();
    });
    let picture = play(&list);
    let draws = draws(&picture);
    let first = draws[0].paint();
    assert!(first.image_filter.is_some());
    assert!(first.mask_blur_descriptor.is_some());
    assert_eq!(first.blend_mode, BlendMode::Multiply);
    assert!(first.dither);

    let second = draws[1].paint();
    assert!(second.image_filter.is_none());
    assert!(second.mask_blur_descriptor.is_none());
    assert_eq!(second.blend_mode, BlendMode::Multiply);
}

fn runtime_effect(sampler: Option<DlColorSource>) -> DlColorSource {
    DlColorSource::RuntimeEffect(DlRuntimeEffect {
        runtime_stage: Arc::new(RuntimeStage::new("main", vec![0_u8; 4])),
        uniform_data: Arc::from([1_u8, 2, 3, 4].as_slice()),
        samplers: vec![sampler.map(Arc::new)],
    })
}

fn linear_gradient() -> DlColorSource {
    DlColorSource::LinearGradient(DlLinearGradient {
        start_point: DlPoint::new(0.0, 0.0),
        end_point: DlPoint::new(10.0, 0.0),
        stops: DlGradientStops::evenly_spaced(vec![DlColor::RED, DlColor::BLUE])
            .expect("two colors"),
        tile_mode: DlTileMode::Clamp,
        matrix: DlMatrix::IDENTITY,
    })
}

#[test]
fn runtime_effect_with_non_image_sampler_leaves_paint() {
    let list = record(|b| {
        b.set_color_source(Some(&linear_gradient()));
        b.set_color_source(Some(&runtime_effect(Some(DlColorSource::Color(
            DlColor::RED,
        )))));
        b.draw_paint();
    });
    let picture = play(&list);
    assert!(matches!(
        draws(&picture)[0].paint().color_source,
        ColorSource::LinearGradient { .. }
    ));
}

#[test]
fn runtime_effect_binds_image_samplers() {
    let image = DlColorSource::Image(DlImageColorSource {
        image: DlImage::from_texture(texture(4, 4)),
        horizontal_tile_mode: DlTileMode::Repeat,
        vertical_tile_mode: DlTileMode::Repeat,
        sampling: DlImageSampling::Linear,
        matrix: DlMatrix::IDENTITY,
    });
    let list = record(|b| {
        b.set_color_source(Some(&runtime_effect(Some(image))));
        b.draw_paint();
    });
    let picture = play(&list);
    let ColorSource::RuntimeEffect {
        runtime_stage,
        uniform_data,
        texture_inputs,
    } = &draws(&picture)[0].paint().color_source
    else {
        panic!("expected a runtime effect source");
    };
    assert_eq!(runtime_stage.entrypoint(), "main");
    assert_eq!(&**uniform_data, &[1, 2, 3, 4]);
    assert_eq!(texture_inputs.len(), 1);
    assert_eq!(texture_inputs[0].texture.size().width, 4.0);
}

#[test]
fn clearing_the_color_source_restores_solid_color() {
    let list = record(|b| {
        b.set_color(DlColor::GREEN);
        b.set_color_source(Some(&linear_gradient()));
        b.set_color_source(None);
        b.draw_paint();
        b.set_color_source(Some(&DlColorSource::Color(DlColor::BLUE)));
        b.draw_paint();
    });
    let picture = play(&list);
    let draws = draws(&picture);
    assert!(draws[0].paint().is_solid_color());
    assert_eq!(draws[0].paint().color, to_color(DlColor::GREEN));
    assert!(draws[1].paint().is_solid_color());
    assert_eq!(draws[1].paint().color, to_color(DlColor::BLUE));
}

#[test]
fn unrealized_images_draw_nothing() {
    let image = DlImage::unrealized(16, 16);
    let atlas = DlAtlas::new(
        Some(image.clone()),
        vec![DlRSTransform::from_radians(1.0, 0.0, 0.0, 0.0)],
        vec![rect(0.0, 0.0, 16.0, 16.0)],
        None,
        DlBlendMode::SrcOver,
        DlImageSampling::Linear,
        None,
    )
    .expect("matching attributes");
    let list = record(|b| {
        b.draw_image(Some(&image), DlPoint::new(0.0, 0.0), DlImageSampling::Linear, true);
        b.draw_image_rect(
            Some(&image),
            &rect(0.0, 0.0, 16.0, 16.0),
            &rect(0.0, 0.0, 32.0, 32.0),
            DlImageSampling::Linear,
            true,
            stipple_display_list::DlSrcRectConstraint::Fast,
        );
        b.draw_image_nine(
            Some(&image),
            &DlIRect::from_ltrb(4, 4, 12, 12),
            &rect(0.0, 0.0, 64.0, 64.0),
            DlFilterMode::Linear,
            true,
        );
        b.draw_atlas(&atlas, true);
        b.draw_image(None, DlPoint::new(0.0, 0.0), DlImageSampling::Linear, false);
    });
    assert_eq!(play(&list).draws().count(), 0);
}

#[test]
fn draw_image_covers_the_texture() {
    let image = DlImage::from_texture(texture(8, 4));
    let list = record(|b| {
        b.set_color(DlColor::RED);
        b.draw_image(
            Some(&image),
            DlPoint::new(2.0, 3.0),
            DlImageSampling::NearestNeighbor,
            false,
        );
        b.draw_image(
            Some(&image),
            DlPoint::new(2.0, 3.0),
            DlImageSampling::NearestNeighbor,
            true,
        );
    });
    let picture = play(&list);
    let draws = draws(&picture);
    assert_eq!(draws.len(), 2);
    let DrawOp::ImageRect {
        src,
        dst,
        paint,
        sampler,
        ..
    } = draws[0]
    else {
        panic!("expected an image draw, got {:?}", draws[0]);
    };
    assert_eq!(*src, Rect::new(0.0, 0.0, 8.0, 4.0));
    assert_eq!(*dst, Rect::new(2.0, 3.0, 10.0, 7.0));
    assert_eq!(*paint, Paint::default());
    assert_eq!(*sampler, to_sampler_descriptor(DlImageSampling::NearestNeighbor));

    assert_eq!(draws[1].paint().color, to_color(DlColor::RED));
}

#[test]
fn nine_patch_draws_one_image_per_patch() {
    let image = DlImage::from_texture(texture(30, 30));
    let list = record(|b| {
        b.set_color(DlColor::BLUE);
        b.draw_image_nine(
            Some(&image),
            &DlIRect::from_ltrb(10, 10, 20, 20),
            &rect(0.0, 0.0, 100.0, 60.0),
            DlFilterMode::Nearest,
            false,
        );
    });
    let picture = play(&list);
    let draws = draws(&picture);
    assert_eq!(draws.len(), 9);
    for draw in &draws {
        let DrawOp::ImageRect { paint, sampler, .. } = draw else {
            panic!("expected an image draw, got {draw:?}");
        };
        assert_eq!(*sampler, to_filter_sampler_descriptor(DlFilterMode::Nearest));
        assert_eq!(paint.color, to_color(DlColor::BLUE));
    }
    let covered: f64 = draws
        .iter()
        .filter_map(|draw| match draw {
            DrawOp::ImageRect { dst, .. } => Some(dst.area()),
            _ => None,
        })
        .sum();
    assert_eq!(covered, 6000.0);
}

#[test]
fn atlas_keeps_sprites() {
    let image = DlImage::from_texture(texture(16, 16));
    let atlas = DlAtlas::new(
        Some(image),
        vec![
            DlRSTransform::from_radians(1.0, 0.0, 0.0, 0.0),
            DlRSTransform::from_radians(1.0, 0.0, 20.0, 0.0),
        ],
        vec![rect(0.0, 0.0, 8.0, 8.0), rect(8.0, 0.0, 16.0, 8.0)],
        Some(vec![DlColor::RED, DlColor::GREEN]),
        DlBlendMode::Modulate,
        DlImageSampling::Linear,
        Some(rect(0.0, 0.0, 28.0, 8.0)),
    )
    .expect("matching attributes");
    let list = record(|b| b.draw_atlas(&atlas, false));
    let picture = play(&list);
    let draws = draws(&picture);
    let DrawOp::Atlas { atlas, .. } = draws[0] else {
        panic!("expected an atlas draw, got {:?}", draws[0]);
    };
    assert_eq!(atlas.len(), 2);
    assert_eq!(atlas.colors.len(), 2);
    assert_eq!(atlas.blend_mode, to_blend_mode(DlBlendMode::Modulate));
    assert_eq!(atlas.cull_rect, Some(Rect::new(0.0, 0.0, 28.0, 8.0)));
    assert_eq!(atlas.texture_rects[1], Rect::new(8.0, 0.0, 16.0, 8.0));
}

#[test]
fn paths_specialize_to_primitives() {
    let list = record(|b| {
        b.draw_path(&DlPath::rect(rect(0.0, 0.0, 4.0, 4.0)));
        b.draw_path(&DlPath::oval(rect(0.0, 0.0, 10.0, 10.0)));
        b.draw_path(&DlPath::rrect(DlRRect::from_rect_radius(
            rect(0.0, 0.0, 20.0, 10.0),
            3.0,
        )));
        b.draw_path(&DlPath::oval(rect(0.0, 0.0, 20.0, 10.0)));
        let mut triangle = DlPath::new();
        triangle
            .move_to(DlPoint::new(0.0, 0.0))
            .line_to(DlPoint::new(10.0, 0.0))
            .line_to(DlPoint::new(5.0, 8.0))
            .close();
        b.draw_path(&triangle);
    });
    let picture = play(&list);
    let draws = draws(&picture);
    assert_eq!(draws.len(), 5);
    assert!(matches!(draws[0], DrawOp::Rect { rect, .. }
        if *rect == Rect::new(0.0, 0.0, 4.0, 4.0)));
    assert!(matches!(draws[1], DrawOp::Circle { center, radius, .. }
        if *center == Point::new(5.0, 5.0) && *radius == 5.0));
    assert!(matches!(draws[2], DrawOp::RRect { radius, .. } if *radius == 3.0));
    assert!(matches!(draws[3], DrawOp::Path { .. }));
    let DrawOp::Path { path, .. } = draws[4] else {
        panic!("expected a path draw, got {:?}", draws[4]);
    };
    assert_eq!(path.fill, FillRule::NonZero);
    assert_eq!(path.bounds(), Rect::new(0.0, 0.0, 10.0, 8.0));
}

#[test]
fn ovals_and_round_rects() {
    let uneven = DlRRect::from_rect_radii(
        rect(0.0, 0.0, 20.0, 20.0),
        [
            DlPoint::new(2.0, 2.0),
            DlPoint::new(4.0, 4.0),
            DlPoint::new(2.0, 2.0),
            DlPoint::new(2.0, 2.0),
        ],
    );
    let list = record(|b| {
        b.draw_oval(&rect(0.0, 0.0, 6.0, 6.0));
        b.draw_oval(&rect(0.0, 0.0, 6.0, 3.0));
        b.draw_rrect(&DlRRect::from_rect_radius(rect(0.0, 0.0, 9.0, 9.0), 2.0));
        b.draw_rrect(&uneven);
    });
    let picture = play(&list);
    let draws = draws(&picture);
    assert!(matches!(draws[0], DrawOp::Circle { radius, .. } if *radius == 3.0));
    assert!(matches!(draws[1], DrawOp::Path { .. }));
    assert!(matches!(draws[2], DrawOp::RRect { radius, .. } if *radius == 2.0));
    let DrawOp::Path { path, .. } = draws[3] else {
        panic!("expected a path draw, got {:?}", draws[3]);
    };
    assert_eq!(path.bounds(), Rect::new(0.0, 0.0, 20.0, 20.0));
}

#[test]
fn double_round_rect_is_even_odd() {
    let list = record(|b| {
        b.draw_drrect(
            &DlRRect::from_rect_radius(rect(0.0, 0.0, 100.0, 100.0), 10.0),
            &DlRRect::from_rect_radius(rect(10.0, 10.0, 90.0, 90.0), 5.0),
        );
    });
    let picture = play(&list);
    let DrawOp::Path { path, .. } = draws(&picture)[0] else {
        panic!("expected a path draw");
    };
    assert_eq!(path.fill, FillRule::EvenOdd);
    assert_eq!(path.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));

    // Under even-odd, the ring is covered and the hole is not.
    let covered = |p: Point| path.bez.winding(p) % 2 != 0;
    assert!(covered(Point::new(5.0, 50.0)));
    assert!(covered(Point::new(95.0, 50.0)));
    assert!(!covered(Point::new(50.0, 50.0)));
    assert!(!covered(Point::new(150.0, 50.0)));
}

#[test]
fn lines_are_always_stroked() {
    let list = record(|b| {
        b.set_draw_style(DlDrawStyle::Fill);
        b.draw_line(DlPoint::new(0.0, 0.0), DlPoint::new(10.0, 5.0));
    });
    let picture = play(&list);
    let DrawOp::Path { path, paint } = draws(&picture)[0] else {
        panic!("expected a path draw");
    };
    assert_eq!(paint.style, PaintStyle::Stroke);
    assert_eq!(path.bounds(), Rect::new(0.0, 0.0, 10.0, 5.0));
}

#[test]
fn point_modes() {
    let points = [
        DlPoint::new(0.0, 0.0),
        DlPoint::new(1.0, 0.0),
        DlPoint::new(2.0, 0.0),
        DlPoint::new(3.0, 0.0),
        DlPoint::new(4.0, 0.0),
    ];
    let list = record(|b| {
        b.set_stroke_width(4.0);
        b.set_stroke_cap(DlStrokeCap::Round);
        b.draw_points(DlPointMode::Points, &points);
        b.set_stroke_cap(DlStrokeCap::Butt);
        b.draw_points(DlPointMode::Points, &points[..1]);
        b.draw_points(DlPointMode::Lines, &points);
        b.draw_points(DlPointMode::Polygon, &points[..3]);
    });
    let picture = play(&list);
    let draws = draws(&picture);
    assert_eq!(draws.len(), 2 + 2 + 2);

    let DrawOp::Points {
        points: sprites,
        radius,
        paint,
        style,
    } = draws[0]
    else {
        panic!("expected point sprites, got {:?}", draws[0]);
    };
    assert_eq!(sprites.len(), 5);
    assert_eq!(*radius, 2.0);
    assert_eq!(*style, PointStyle::Round);
    assert_eq!(paint.style, PaintStyle::Stroke);
    assert_eq!(paint.stroke_cap, Cap::Round);

    assert!(matches!(draws[1], DrawOp::Points { style: PointStyle::Square, .. }));
    // Odd trailing point is dropped in line mode.
    assert!(draws[2..].iter().all(|draw| matches!(draw, DrawOp::Path { .. })));
}

#[test]
fn clips_specialize_like_draws() {
    let list = record(|b| {
        b.clip_rect(&rect(0.0, 0.0, 5.0, 5.0), DlClipOp::Difference, true);
        b.clip_rrect(
            &DlRRect::from_rect_radius(rect(0.0, 0.0, 50.0, 50.0), 4.0),
            DlClipOp::Intersect,
            true,
        );
        b.clip_rrect(
            &DlRRect::from_rect_xy(rect(0.0, 0.0, 50.0, 50.0), 4.0, 2.0),
            DlClipOp::Intersect,
            true,
        );
        b.clip_path(&DlPath::rect(rect(0.0, 0.0, 1.0, 1.0)), DlClipOp::Intersect, false);
    });
    let picture = play(&list);
    let ops = state_ops(&picture);
    assert_eq!(ops.len(), 4);
    assert_eq!(
        ops[0],
        &StateOp::ClipRect {
            rect: Rect::new(0.0, 0.0, 5.0, 5.0),
            op: ClipOperation::Difference,
        }
    );
    assert!(matches!(ops[1], StateOp::ClipRRect { radius, op: ClipOperation::Intersect, .. }
        if *radius == 4.0));
    assert!(matches!(ops[2], StateOp::ClipPath { .. }));
    assert!(matches!(ops[3], StateOp::ClipPath { .. }));
}

#[test]
fn save_layer_attributes_and_backdrop() {
    let backdrop = DlImageFilter::Blur {
        sigma_x: 2.0,
        sigma_y: 2.0,
        tile_mode: DlTileMode::Clamp,
    };
    let list = record(|b| {
        b.set_color(DlColor::RED);
        b.save_layer(
            Some(&rect(0.0, 0.0, 10.0, 10.0)),
            SaveLayerOptions::WITH_ATTRIBUTES,
            None,
        );
        b.restore();
        b.save_layer(None, SaveLayerOptions::NO_ATTRIBUTES, Some(&backdrop));
        b.restore();
    });
    let picture = play(&list);
    let ops = state_ops(&picture);
    let StateOp::SaveLayer {
        paint,
        bounds,
        backdrop,
    } = ops[0]
    else {
        panic!("expected a save layer, got {:?}", ops[0]);
    };
    assert_eq!(paint.color, to_color(DlColor::RED));
    assert_eq!(*bounds, Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    assert!(backdrop.is_none());

    let StateOp::SaveLayer {
        paint,
        bounds,
        backdrop,
    } = ops[2]
    else {
        panic!("expected a save layer, got {:?}", ops[2]);
    };
    assert_eq!(*paint, Paint::default());
    assert_eq!(*bounds, None);
    assert!(backdrop.is_some());
}

#[test]
fn draw_color_ignores_current_paint() {
    let list = record(|b| {
        b.set_draw_style(DlDrawStyle::Stroke);
        b.set_stroke_width(3.0);
        b.draw_color(DlColor::GREEN, DlBlendMode::Src);
    });
    let picture = play(&list);
    assert_eq!(
        draws(&picture)[0],
        &DrawOp::Paint {
            paint: Paint {
                color: to_color(DlColor::GREEN),
                blend_mode: to_blend_mode(DlBlendMode::Src),
                ..Paint::default()
            },
        }
    );
}

#[test]
fn triangle_fans_become_indexed_triangles() {
    let vertices = DlVertices::new(
        DlVertexMode::TriangleFan,
        vec![
            DlPoint::new(0.0, 0.0),
            DlPoint::new(10.0, 0.0),
            DlPoint::new(10.0, 10.0),
            DlPoint::new(0.0, 10.0),
        ],
        None,
        None,
        None,
    )
    .expect("valid vertices");
    let list = record(|b| b.draw_vertices(&vertices, DlBlendMode::DstOver));
    let picture = play(&list);
    let DrawOp::Vertices {
        vertices,
        blend_mode,
        ..
    } = draws(&picture)[0]
    else {
        panic!("expected a vertices draw");
    };
    assert_eq!(vertices.mode, VertexMode::Triangles);
    assert_eq!(vertices.indices.as_deref(), Some(&[0_u16, 1, 2, 0, 2, 3][..]));
    assert_eq!(*blend_mode, to_blend_mode(DlBlendMode::DstOver));
}

fn one_glyph_blob() -> DlTextBlob {
    DlTextBlob::new(vec![DlGlyphRun {
        font: DlFont {
            typeface_id: 1,
            size: 12.0,
        },
        glyphs: vec![DlGlyph {
            id: 42,
            position: DlPoint::new(1.0, 0.0),
            outline: DlPath::rect(rect(0.0, -8.0, 6.0, 0.0)),
        }],
    }])
}

#[test]
fn solid_fill_text_uses_glyphs() {
    let blob = one_glyph_blob();
    let list = record(|b| b.draw_text_blob(&blob, 10.0, 20.0));
    let picture = play(&list);
    let DrawOp::TextFrame {
        frame, position, ..
    } = draws(&picture)[0]
    else {
        panic!("expected a text frame");
    };
    assert_eq!(*position, Point::new(10.0, 20.0));
    assert_eq!(frame.glyph_count(), 1);
    assert_eq!(frame.runs[0].glyph_positions[0].glyph, 42);
}

#[test]
fn stroked_or_shaded_text_becomes_a_path() {
    let blob = one_glyph_blob();
    let list = record(|b| {
        b.set_draw_style(DlDrawStyle::Stroke);
        b.draw_text_blob(&blob, 10.0, 20.0);
        b.set_draw_style(DlDrawStyle::Fill);
        b.set_color_source(Some(&linear_gradient()));
        b.draw_text_blob(&blob, 10.0, 20.0);
    });
    let picture = play(&list);
    let draws = draws(&picture);
    assert_eq!(draws.len(), 2);
    for draw in draws {
        let DrawOp::Path { path, .. } = draw else {
            panic!("expected a path draw, got {draw:?}");
        };
        // Blob bounds moved to the draw origin.
        assert_eq!(path.bounds(), Rect::new(11.0, 12.0, 17.0, 20.0));
    }
}

#[test]
fn empty_text_draws_nothing() {
    let blob = DlTextBlob::new(Vec::new());
    let list = record(|b| b.draw_text_blob(&blob, 0.0, 0.0));
    assert_eq!(play(&list).draws().count(), 0);
}

#[test]
fn shadow_is_offset_and_blurred() {
    let path = DlPath::rect(rect(0.0, 0.0, 10.0, 10.0));
    let list = record(|b| {
        b.set_color(DlColor::RED);
        b.draw_shadow(&path, DlColor::BLACK, 4.0, false, 2.0);
        b.draw_rect(&rect(0.0, 0.0, 1.0, 1.0));
    });
    let picture = play(&list);
    let events = &picture.events;
    assert_eq!(events.len(), 5);
    assert!(matches!(&events[0], Event::State { op: StateOp::Save, .. }));
    assert!(matches!(&events[1], Event::State { op: StateOp::PreConcat(m), .. }
        if *m == Matrix::translation(0.0, 8.0, 0.0)));

    let Event::Draw { op, state } = &events[2] else {
        panic!("expected the shadow draw, got {:?}", events[2]);
    };
    assert_eq!(state.transform, Matrix::translation(0.0, 8.0, 0.0));
    assert_eq!(
        op,
        &DrawOp::Rect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            paint: Paint {
                style: PaintStyle::Fill,
                color: spot_color(to_color(DlColor::BLACK)),
                mask_blur_descriptor: Some(shadow_mask_blur(8.0, 1.0)),
                ..Paint::default()
            },
        }
    );
    assert!(matches!(&events[3], Event::State { op: StateOp::Restore, .. }));

    // The shadow leaves the current paint alone.
    assert_eq!(
        events[4].as_draw().map(DrawOp::paint),
        Some(&Paint::with_color(to_color(DlColor::RED)))
    );
}

#[test]
fn shadow_blur_accounts_for_vertical_scale() {
    let path = DlPath::oval(rect(0.0, 0.0, 10.0, 10.0));
    let list = record(|b| {
        b.scale(1.0, 2.0);
        b.draw_shadow(&path, DlColor::BLACK, 3.0, true, 1.0);
    });
    let picture = play(&list);
    let DrawOp::Circle { paint, .. } = draws(&picture)[0] else {
        panic!("expected a circle shadow");
    };
    assert_eq!(paint.mask_blur_descriptor, Some(shadow_mask_blur(3.0, 2.0)));
}

// Counts error-level events.
#[derive(Clone, Debug, Default)]
struct ErrorCount(Arc<AtomicUsize>);

impl ErrorCount {
    fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

impl<S: tracing::Subscriber> Layer<S> for ErrorCount {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[test]
fn path_effects_are_logged_and_ignored() {
    let errors = ErrorCount::default();
    let subscriber = tracing_subscriber::registry().with(errors.clone());
    let mut dispatcher = Dispatcher::new(RefCanvas::new());
    tracing::subscriber::with_default(subscriber, || {
        dispatcher.set_path_effect(Some(&DlPathEffect::Dash {
            intervals: vec![2.0, 1.0],
            phase: 0.0,
        }));
        dispatcher.set_path_effect(None);
    });
    assert_eq!(errors.get(), 2);
    assert_eq!(dispatcher.paint(), &Paint::default());
    assert!(dispatcher.canvas().events().is_empty());
}

#[test]
fn dispatcher_exposes_paint_and_canvas() {
    let mut dispatcher = Dispatcher::new(RefCanvas::new());
    dispatcher.set_color(DlColor::BLUE);
    dispatcher.set_stroke_width(2.5);
    dispatcher.set_invert_colors(true);
    assert_eq!(dispatcher.paint().color, to_color(DlColor::BLUE));
    assert_eq!(dispatcher.paint().stroke_width, 2.5);
    assert!(dispatcher.paint().has_color_filter());

    dispatcher.draw_paint();
    assert_eq!(dispatcher.canvas().draws().count(), 1);
    dispatcher.canvas_mut().clear_events();
    let canvas = dispatcher.into_canvas();
    assert!(canvas.events().is_empty());
}
