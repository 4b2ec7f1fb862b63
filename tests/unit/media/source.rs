use super::*;

fn size() -> FrameSize {
    FrameSize {
        width: 4,
        height: 2,
    }
}

#[test]
fn in_memory_source_yields_in_order_then_ends() {
    let frames = vec![
        FrameRGBA::solid(size(), [1, 0, 0, 255]),
        FrameRGBA::solid(size(), [2, 0, 0, 255]),
    ];
    let mut src = InMemorySource::new(size(), frames).unwrap();
    assert_eq!(src.remaining(), 2);
    assert_eq!(src.next_frame().unwrap().unwrap().data[0], 1);
    assert_eq!(src.next_frame().unwrap().unwrap().data[0], 2);
    assert!(src.next_frame().unwrap().is_none());
    assert!(src.next_frame().unwrap().is_none());
}

#[test]
fn in_memory_source_rejects_mismatched_frames() {
    let other = FrameSize {
        width: 2,
        height: 2,
    };
    assert!(InMemorySource::new(size(), vec![FrameRGBA::solid(other, [0; 4])]).is_err());
}

#[test]
fn read_full_reports_short_reads() {
    let data = [7u8; 10];
    let mut r = &data[..];
    let mut buf = [0u8; 8];
    assert_eq!(read_full(&mut r, &mut buf).unwrap(), 8);
    assert_eq!(read_full(&mut r, &mut buf).unwrap(), 2);
    assert_eq!(read_full(&mut r, &mut buf).unwrap(), 0);
}

#[test]
fn raw_frame_length_is_checked() {
    assert!(FrameRGBA::from_raw(size(), vec![0; 31]).is_err());
    let f = FrameRGBA::from_raw(size(), vec![9; 32]).unwrap();
    assert_eq!(f.pixel(3, 1), Some([9, 9, 9, 9]));
    assert_eq!(f.pixel(4, 0), None);
}
