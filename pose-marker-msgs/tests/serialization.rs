use cdr::{CdrLe, Infinite};
use pose_marker_msgs::{
    MessageTypeInfo,
    builtin_interfaces::{Duration, Time},
    geometry_msgs::{Point, Pose, Quaternion, Vector3},
    std_msgs::{ColorRGBA, Header},
    visualization_msgs::{Marker, UVCoordinate},
};

#[test]
fn test_pose_layout() {
    let pose = Pose {
        position: Point {
            x: 1.0,
            y: 2.0,
            z: 3.0,
        },
        orientation: Quaternion::default(),
    };
    let bytes = cdr::serialize::<_, _, CdrLe>(&pose, Infinite).unwrap();
    // Encapsulation header plus seven packed doubles
    assert_eq!(bytes.len(), 4 + 7 * 8);
    assert_eq!(&bytes[4..12], &1.0f64.to_le_bytes());
    assert_eq!(&bytes[52..60], &1.0f64.to_le_bytes());
}

#[test]
fn test_marker_roundtrip() {
    let marker = Marker {
        header: Header {
            stamp: Time::new(1_700_000_000, 42),
            frame_id: "map".to_string(),
        },
        ns: "poses".to_string(),
        id: 3,
        r#type: Marker::CUBE,
        action: Marker::ADD,
        scale: Vector3::new(1.0, 2.0, 0.5),
        color: ColorRGBA::new(1.0, 0.0, 0.0, 1.0),
        lifetime: Duration::new(1, 0),
        points: vec![Point::default(); 2],
        uv_coordinates: vec![UVCoordinate { u: 0.5, v: 0.25 }],
        text: "cube".to_string(),
        ..Default::default()
    };
    let bytes = cdr::serialize::<_, _, CdrLe>(&marker, Infinite).unwrap();
    let decoded: Marker = cdr::deserialize(&bytes).unwrap();
    assert_eq!(decoded, marker);
}

#[test]
fn test_reference_type_hashes() {
    assert_eq!(
        Time::type_hash().to_rihs_string(),
        "RIHS01_b106235e25a4c5ed35098aa0a61a3ee9c9b18d197f398b0e4206cea9acf9c197"
    );
    assert_eq!(
        Vector3::type_hash().to_rihs_string(),
        "RIHS01_cc12fe83e4c02719f1ce8070bfd14aecd40f75a96696a67a2a1f37f7dbb0765d"
    );
    assert_eq!(
        Pose::type_hash().to_rihs_string(),
        "RIHS01_d501954e9476cea2996984e812054b68026ae0bfae789d9a10b23daf35cc90fa"
    );
    assert_eq!(
        Header::type_hash().to_rihs_string(),
        "RIHS01_f49fb3ae2cf070f793645ff749683ac6b06203e41c891e17701b1cb597ce6a01"
    );
    assert_eq!(
        ColorRGBA::type_hash().to_rihs_string(),
        "RIHS01_77a7a5b9ae477306097665106e0413ba74440245b1f3d0c6d6405fe5c7813fe8"
    );
}

#[test]
fn test_marker_type_hash() {
    // Jazzy layout, including texture, uv_coordinates and mesh_file
    assert_eq!(
        Marker::type_hash().to_rihs_string(),
        "RIHS01_45b13ccf791f225962bf74e746f9644518855d783a6f42ba0cc14fde2b4f3ce0"
    );
    assert_eq!(Marker::type_info().hash, Marker::type_hash());
}

#[test]
fn test_dds_names() {
    assert_eq!(Pose::dds_name(), "geometry_msgs::msg::dds_::Pose_");
    assert_eq!(Marker::dds_name(), "visualization_msgs::msg::dds_::Marker_");
    assert_eq!(
        Marker::type_info().name,
        "visualization_msgs::msg::dds_::Marker_"
    );
}
